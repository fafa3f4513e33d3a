pub(crate) mod alpha;
pub(crate) mod behaviour;
pub(crate) mod timeline;
