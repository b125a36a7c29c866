mod money;
mod registration;
mod reservation;
mod shift;

pub use money::*;
pub use registration::*;
pub use reservation::*;
pub use shift::*;
