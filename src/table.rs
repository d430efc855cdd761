use crate::model::ResolvedDevice;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};

/// Render resolved devices as a table, one row per address
pub fn device_table(devices: &[ResolvedDevice]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    table.set_header(vec!["IP", "Name", "Detected Via", "Descriptor"]);

    for device in devices {
        table.add_row(vec![
            Cell::new(device.address.to_string()).add_attribute(Attribute::Bold),
            Cell::new(&device.name),
            Cell::new(&device.method),
            Cell::new(device.descriptor_location.as_deref().unwrap_or("-")),
        ]);
    }

    table
}
