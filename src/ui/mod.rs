mod dropdown;
mod input;

pub use dropdown::{DropDown, DropDownConfig, DropDownEvent, DropDownHit};
pub use input::{Input, InputConfig, InputEvent, KeyboardType};
