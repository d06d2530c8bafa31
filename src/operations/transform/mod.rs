mod orient;

pub use orient::OrientPath;
