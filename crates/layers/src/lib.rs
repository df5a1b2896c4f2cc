pub mod controls;
pub mod labels;
pub mod map_view;
pub mod search;
pub mod symbology;

pub use controls::*;
pub use labels::*;
pub use map_view::*;
pub use search::*;
pub use symbology::*;
