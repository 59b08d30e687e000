pub mod fmip;
pub mod lroma;
