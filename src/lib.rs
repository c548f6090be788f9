mod alternating;
mod error;
mod exhaustive;
mod kd_tree;
mod point;
mod point_cloud;

pub mod prelude {
    pub use crate::alternating::*;
    pub use crate::error::*;
    pub use crate::exhaustive::*;
    pub use crate::kd_tree::*;
    pub use crate::point::*;
    pub use crate::point_cloud::*;
}
