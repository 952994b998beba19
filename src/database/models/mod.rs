pub mod attendance;
pub mod homework;
pub mod lesson;
pub mod setting;
pub mod user;

pub use attendance::*;
pub use homework::*;
pub use lesson::*;
pub use setting::*;
pub use user::*;
