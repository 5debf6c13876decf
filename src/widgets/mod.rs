pub mod date_picker;
pub mod list_sheet;
pub mod moment_screen;
pub mod otp_screen;
pub mod traits;

pub use list_sheet::ListSheet;
pub use moment_screen::{Field, MomentScreen};
pub use otp_screen::OtpScreen;
pub use traits::{Drawable, InteractionResult, Interactive, RenderContext, WidgetAction};
