pub(crate) mod observation;
pub(crate) mod record;
pub(crate) mod rows;
