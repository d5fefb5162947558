pub(crate) mod classify;
pub(crate) mod params;
pub(crate) mod validate;
