pub mod view;
pub mod widget;

pub use view::{render_gate, render_locked};
pub use widget::{
    GateAction, GateAssets, GateHooks, GateSnapshot, GateWidget, TraySlot, WidgetSubscriber,
    ERROR_FLASH_MS,
};
