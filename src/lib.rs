//! Flugplan-Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod command;
pub mod core;
pub mod json;
pub mod render;
pub mod shared;

pub use command::{project_commands, DroneCommand, ViewMode};
pub use core::{
    Action, ActionType, FlightPlan, FlightPlanEstimations, GeoPoint, PoiPoint, Waypoint,
};
pub use json::{
    parse_saved_flight_plan, read_saved_flight_plan, write_saved_flight_plan,
    write_saved_flight_plan_to_file, SavedFlightPlan,
};
pub use render::{
    compute_draw_order, DeferredReorder, FlightPlanOverlay, Graphic, GraphicId, GraphicKind,
    MapSurface, RecordingSurface,
};
pub use shared::EditorOptions;
