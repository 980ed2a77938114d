#[macro_use]
pub(crate) mod test_util;

mod test_undo;
