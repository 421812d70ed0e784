//! Low-level helpers shared by the spreadsheet readers and writers.

pub(crate) mod string;
pub(crate) mod xml;
pub(crate) mod zip;
