mod bound_check;
mod date_ext;
mod error;
mod reader;
mod shift;
mod timer;

pub use crate::bound_check::{
    build_query, check_bounds, check_bounds_timed, BoundCheck, BoundCheckRequest, DateFormat,
    Division,
};
pub use crate::date_ext::{today, DateExt};
pub use crate::error::{DateBoundError, Result};
pub use crate::reader::{ReadError, Readers, TabularResult, WarehouseReader};
pub use crate::shift::{shift, shift_date, shift_from_today};
pub use crate::timer::timed;
