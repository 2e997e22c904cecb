//! The `mechgg games` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mechgg_core::games;
use mechgg_core::model::Category;

pub fn execute(category: Option<String>) -> Result<()> {
    let category = category
        .map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()?;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Category", "Style"]);
    for g in games::list(category) {
        table.add_row(vec![
            Cell::new(g.id),
            Cell::new(format!("{} {}", g.cover_emoji, g.name)),
            Cell::new(g.category),
            Cell::new(g.style),
        ]);
    }
    println!("{table}");
    Ok(())
}
