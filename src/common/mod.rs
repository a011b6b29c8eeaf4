pub use object::{Object, File, BaseConfig, BaseQuality, BaseMetric};
pub use object::{BaseAvailability, BaseAvailabilityQuery};
pub use object::{Labels, LabelsMap, Vars};
pub use observe::{Observability, Stats};
pub use render::{Render, Templates, render_or_raw};
pub use utils::{merge, remove_empty, split, VarFormat};

mod object;
mod observe;
mod render;
mod utils;
