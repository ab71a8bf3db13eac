//! Camera navigation for tree viewing.
//!
//! The navigation state machine is pure (mouse deltas in, transforms out);
//! the controller system wires it to window input and the camera entity.

pub mod controller;
pub mod navigation;

pub use controller::camera_controller;
pub use navigation::Navigation;
