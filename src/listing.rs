use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

use crate::runner::ProbeKind;

/// 把探针目录渲染成表格，不发任何请求
pub fn probe_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Section", "Probe", "Method", "Path", "Auth"]);

    for (index, kind) in ProbeKind::ALL.iter().enumerate() {
        let auth = if kind.requires_auth() {
            Cell::new("bearer").fg(Color::Yellow)
        } else {
            Cell::new("-")
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(kind.section()),
            Cell::new(kind.name()),
            Cell::new(kind.method()),
            Cell::new(kind.route()).add_attribute(Attribute::Dim),
            auth,
        ]);
    }

    table
}

pub fn list_probes() {
    println!("{}", probe_table());
}
