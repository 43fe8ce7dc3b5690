use crate::catalog::material::MaterialOption;
use crate::foundation::core::Rgba8;

/// Compiled-in frame mouldings used when the catalog service returns nothing.
pub fn default_frames() -> Vec<MaterialOption> {
    vec![
        MaterialOption::frame(1, "Matte Black", Rgba8::rgb(0x00, 0x00, 0x00), 125, "Wood"),
        MaterialOption::frame(2, "White Gallery", Rgba8::rgb(0xFF, 0xFF, 0xFF), 175, "Wood"),
        MaterialOption::frame(3, "Natural Maple", Rgba8::rgb(0xE5, 0xDC, 0xC5), 150, "Wood"),
        MaterialOption::frame(4, "Cherry Wood", Rgba8::rgb(0x6E, 0x2C, 0x00), 165, "Wood"),
        MaterialOption::frame(5, "Silver Metal", Rgba8::rgb(0xC0, 0xC0, 0xC0), 140, "Metal"),
        MaterialOption::frame(6, "Gold Metal", Rgba8::rgb(0xFF, 0xD7, 0x00), 180, "Metal"),
        MaterialOption::frame(7, "Dark Walnut", Rgba8::rgb(0x5D, 0x4E, 0x37), 155, "Wood"),
        MaterialOption::frame(8, "Espresso", Rgba8::rgb(0x3C, 0x24, 0x15), 145, "Wood"),
        MaterialOption::frame(9, "Champagne", Rgba8::rgb(0xF7, 0xE7, 0xCE), 160, "Metal"),
        MaterialOption::frame(10, "Bronze", Rgba8::rgb(0xCD, 0x7F, 0x32), 170, "Metal"),
        MaterialOption::frame(11, "Mahogany", Rgba8::rgb(0xC0, 0x40, 0x00), 165, "Wood"),
        MaterialOption::frame(12, "Navy Blue", Rgba8::rgb(0x00, 0x00, 0x80), 155, "Wood"),
    ]
}

/// Compiled-in mat boards.
pub fn default_mats() -> Vec<MaterialOption> {
    vec![
        MaterialOption::flat(1, "Classic White", Rgba8::rgb(0xF5, 0xF5, 0xF5), 2999),
        MaterialOption::flat(2, "Light Gray", Rgba8::rgb(0xE0, 0xE0, 0xE0), 3499),
        MaterialOption::flat(3, "Silver Gray", Rgba8::rgb(0xD3, 0xD3, 0xD3), 3999),
        MaterialOption::flat(4, "Ice Blue", Rgba8::rgb(0xF0, 0xF8, 0xFF), 3299),
        MaterialOption::flat(5, "Cream", Rgba8::rgb(0xFF, 0xF8, 0xDC), 3499),
    ]
}

/// Compiled-in glazing options.
pub fn default_glass() -> Vec<MaterialOption> {
    let clear = Rgba8::rgb(0xFF, 0xFF, 0xFF);
    vec![
        MaterialOption::flat(1, "Standard Clear", clear, 2500),
        MaterialOption::flat(2, "UV Protection", clear, 4500),
        MaterialOption::flat(3, "Museum Glass", clear, 8500),
        MaterialOption::flat(4, "Non-Glare", clear, 5500),
        MaterialOption::flat(5, "Conservation Clear", clear, 6500),
        MaterialOption::flat(6, "Acrylic Plexi", clear, 4000),
    ]
}
