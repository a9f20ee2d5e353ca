//! Domain models, ports, and coordination services.
//!
//! Purpose: define the strongly typed entity models exchanged with the
//! administration API, the transport port they travel through, and the
//! pieces that coordinate mutation with re-display (entity service, change
//! notification bus, dialog, views). Wire contracts (serde) are documented
//! on each type.

pub mod building;
pub mod building_data_definition;
pub mod dialog;
pub mod entity;
pub mod entity_service;
pub mod error;
pub mod events;
pub mod info;
pub mod notification;
pub mod ports;
pub mod routing;
pub mod views;

pub use self::building::{Building, BuildingRef};
pub use self::building_data_definition::BuildingDataDefinition;
pub use self::dialog::{Dismissal, DialogState, EntityDialog};
pub use self::entity::{Entity, EntityId, EntityResponse, ResponseContext};
pub use self::entity_service::EntityService;
pub use self::error::{ClientResult, Error, ErrorCode};
pub use self::events::{ACKNOWLEDGEMENT, ChangeNotificationBus, Subscription};
pub use self::info::{Info, InfoDefinitionRef, InfoRef};
pub use self::notification::{Notification, NotificationType};
pub use self::routing::RouteParams;
pub use self::views::{DetailView, ListView};
