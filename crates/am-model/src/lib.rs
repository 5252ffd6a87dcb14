pub mod error;
pub mod layout;
pub mod table;

pub use error::{ConvertError, Result};
pub use layout::{
    LayoutSpec, NITROGEN_MOLAR_MASS, UnitConversion, UnitRule, is_placeholder_column,
    known_layouts,
};
pub use table::{CellValue, Column, RawTable};
