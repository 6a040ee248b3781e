//! The `pairmatch init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("pairmatch.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("templates")?;
    write_if_missing(Path::new("templates/example.toml"), EXAMPLE_TEMPLATE)?;

    write_if_missing(Path::new("answers.example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Edit answers.example.toml with your own answers");
    println!("  2. Run: pairmatch validate --templates templates");
    println!("  3. Run: pairmatch create --answers answers.example.toml");
    println!("  4. Send the printed link to your partner");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pairmatch configuration

store_path = "./.pairmatch/store.json"
templates_dir = "templates"
default_template = "classic"

# Admin login defaults to admin/admin. Set PAIRMATCH_ADMIN_PASSWORD or
# uncomment the line below to change it.
[admin]
username = "admin"
# password = "${PAIRMATCH_ADMIN_PASSWORD}"
"#;

const EXAMPLE_TEMPLATE: &str = r#"[template]
id = "weekend"
title = "Weekend plans"
description = "A short quiz about free time"

[[questions]]
id = 1
category = "Leisure"
text = "Beach or mountains?"
options = ["Beach", "Mountains"]

[[questions]]
id = 2
category = "Leisure"
text = "Saturday night?"
options = ["Party", "Movie at home", "Early night"]

[[questions]]
id = 3
category = "Food"
text = "Cook or order in?"
options = ["Cook together", "Order in", "Eat out"]

[bands]
range0_25 = "You'd plan very different weekends."
range26_50 = "Take turns choosing."
range51_75 = "Mostly on the same page."
range76_100 = "Your weekends plan themselves."
"#;

const EXAMPLE_ANSWERS: &str = r#"[profile]
name = "Alex"
age = 30
gender = ""
relationship_type = "dating"
reflections = ["What I love most about us is..."]

# question id = chosen option (built-in "classic" quiz)
[answers]
1 = "At home together"
2 = "Night owl"
3 = "Take space, then talk"
4 = "Quality time"
5 = "Partly shared"
6 = "Balance both"
7 = "Small town"
8 = "Maybe someday"
9 = "Organised chaos"
10 = "Cats"
"#;
