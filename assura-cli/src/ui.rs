use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

/// Borderless two-column card with bold labels: session, contract state, config.
pub struct InfoCard {
    table: Table,
}

impl Default for InfoCard {
    fn default() -> Self {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);
        Self { table }
    }
}

impl InfoCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, label: &str, value: impl ToString) -> Self {
        self.table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.table.lines().collect()
    }

    /// Print with the 2-space indent the rest of the CLI uses.
    pub fn print(&self) {
        for line in self.lines() {
            println!("  {}", line);
        }
    }
}
