//! Capability shapes: one trait per trigger signature.
//!
//! A behavior type opts into a trigger shape by implementing its trait and
//! exposing the view through [`Behavior::views`](crate::behavior::Behavior::views).
//! The set of exposed views is the instance's [`CapabilitySet`].
//!
//! # Shapes
//!
//! | Shape | Trait | Payload |
//! |---|---|---|
//! | `Plain` | [`Plain`] | none |
//! | `RightClick` | [`RightClick`] | none |
//! | `LeftClick` | [`LeftClick`] | none |
//! | `OffhandClick` | [`OffhandClick`] | none |
//! | `Sneak` | [`Sneak`] | none |
//! | `Sneaking` | [`Sneaking`] | none |
//! | `Sprint` | [`Sprint`] | none |
//! | `Tick` | [`Tick`] | none |
//! | `Hurt` | [`Hurt`] | none |
//! | `ProjectileHit` | [`ProjectileHit`] | none |
//! | `Hit` | [`Hit`] | damage dealt |
//! | `HitTaken` | [`HitTaken`] | damage taken |
//! | `BowShoot` | [`BowShoot`] | arrow force |
//! | `OffhandItem` | [`OffhandItem`] | cancel the swap |
//! | `MainhandItem` | [`MainhandItem`] | cancel the swap |
//!
//! `Plain` is the general shape: it carries no trigger of its own and is
//! reached through adapters.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use armory_core::shape::{Plain, RightClick, ShapeKind, ShapeViews, TriggerContext};
//! use armory_core::result::PowerResult;
//!
//! struct Flare;
//!
//! impl Plain for Flare {
//!     fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
//!         PowerResult::ok()
//!     }
//! }
//!
//! let views = ShapeViews::new().with::<dyn Plain>(Arc::new(Flare));
//! assert!(views.capabilities().contains(ShapeKind::Plain.flag()));
//! assert!(views.get::<dyn RightClick>().is_none());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::result::PowerResult;

// =============================================================================
// Trigger Context
// =============================================================================

/// Identifies the acting player or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates a new actor ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

/// Contextual information passed to a shape invocation.
///
/// Host event payloads stay on the host side; behaviors see the actor and
/// the host tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerContext {
    /// The actor the trigger fired for.
    pub actor: ActorId,
    /// The current host tick.
    pub tick: u64,
}

impl TriggerContext {
    /// Creates a trigger context.
    #[must_use]
    pub const fn new(actor: ActorId, tick: u64) -> Self {
        Self { actor, tick }
    }
}

// =============================================================================
// Shape Kind
// =============================================================================

/// Names every capability shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    /// General fire-and-forget shape.
    Plain,
    /// Right click.
    RightClick,
    /// Left click.
    LeftClick,
    /// Right click with the off hand.
    OffhandClick,
    /// Start sneaking.
    Sneak,
    /// Every tick while sneaking.
    Sneaking,
    /// Start sprinting.
    Sprint,
    /// Every tick.
    Tick,
    /// Holder got hurt.
    Hurt,
    /// A fired projectile hit something.
    ProjectileHit,
    /// Holder hit another actor.
    Hit,
    /// Holder is about to take a hit.
    HitTaken,
    /// Holder shot a bow.
    BowShoot,
    /// Item swapped into the off hand.
    OffhandItem,
    /// Item swapped into the main hand.
    MainhandItem,
}

impl ShapeKind {
    /// All shapes, in flag order.
    pub const ALL: [ShapeKind; 15] = [
        Self::Plain,
        Self::RightClick,
        Self::LeftClick,
        Self::OffhandClick,
        Self::Sneak,
        Self::Sneaking,
        Self::Sprint,
        Self::Tick,
        Self::Hurt,
        Self::ProjectileHit,
        Self::Hit,
        Self::HitTaken,
        Self::BowShoot,
        Self::OffhandItem,
        Self::MainhandItem,
    ];

    /// Returns the single-bit capability flag for this shape.
    #[must_use]
    pub const fn flag(self) -> CapabilitySet {
        CapabilitySet::from_bits_retain(1 << self as u32)
    }

    /// Returns the host trigger name, or `None` for the general shape.
    #[must_use]
    pub const fn trigger_name(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::RightClick => Some("RIGHT_CLICK"),
            Self::LeftClick => Some("LEFT_CLICK"),
            Self::OffhandClick => Some("OFFHAND_CLICK"),
            Self::Sneak => Some("SNEAK"),
            Self::Sneaking => Some("SNEAKING"),
            Self::Sprint => Some("SPRINT"),
            Self::Tick => Some("TICK"),
            Self::Hurt => Some("HURT"),
            Self::ProjectileHit => Some("PROJECTILE_HIT"),
            Self::Hit => Some("HIT"),
            Self::HitTaken => Some("HIT_TAKEN"),
            Self::BowShoot => Some("BOW_SHOOT"),
            Self::OffhandItem => Some("OFFHAND_ITEM"),
            Self::MainhandItem => Some("MAINHAND_ITEM"),
        }
    }

    /// Finds the shape behind a host trigger name.
    #[must_use]
    pub fn from_trigger_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.trigger_name() == Some(name))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

bitflags! {
    /// The set of shapes an instance implements.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CapabilitySet: u32 {
        /// [`ShapeKind::Plain`]
        const PLAIN = 1 << 0;
        /// [`ShapeKind::RightClick`]
        const RIGHT_CLICK = 1 << 1;
        /// [`ShapeKind::LeftClick`]
        const LEFT_CLICK = 1 << 2;
        /// [`ShapeKind::OffhandClick`]
        const OFFHAND_CLICK = 1 << 3;
        /// [`ShapeKind::Sneak`]
        const SNEAK = 1 << 4;
        /// [`ShapeKind::Sneaking`]
        const SNEAKING = 1 << 5;
        /// [`ShapeKind::Sprint`]
        const SPRINT = 1 << 6;
        /// [`ShapeKind::Tick`]
        const TICK = 1 << 7;
        /// [`ShapeKind::Hurt`]
        const HURT = 1 << 8;
        /// [`ShapeKind::ProjectileHit`]
        const PROJECTILE_HIT = 1 << 9;
        /// [`ShapeKind::Hit`]
        const HIT = 1 << 10;
        /// [`ShapeKind::HitTaken`]
        const HIT_TAKEN = 1 << 11;
        /// [`ShapeKind::BowShoot`]
        const BOW_SHOOT = 1 << 12;
        /// [`ShapeKind::OffhandItem`]
        const OFFHAND_ITEM = 1 << 13;
        /// [`ShapeKind::MainhandItem`]
        const MAINHAND_ITEM = 1 << 14;
    }
}

impl CapabilitySet {
    /// Returns true if `kind` is in the set.
    #[must_use]
    pub const fn has(self, kind: ShapeKind) -> bool {
        self.contains(kind.flag())
    }

    /// Iterates the shapes in the set, in flag order.
    pub fn kinds(self) -> impl Iterator<Item = ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(move |kind| self.has(*kind))
    }

    /// Returns the host trigger names of the shapes in the set.
    #[must_use]
    pub fn trigger_names(self) -> Vec<&'static str> {
        self.kinds().filter_map(ShapeKind::trigger_name).collect()
    }
}

// =============================================================================
// Shape Traits
// =============================================================================

/// General shape: fire with no trigger-specific input.
pub trait Plain: Send + Sync {
    /// Fires the behavior.
    fn fire(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Right click trigger.
pub trait RightClick: Send + Sync {
    /// Handles a right click.
    fn right_click(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Left click trigger.
pub trait LeftClick: Send + Sync {
    /// Handles a left click.
    fn left_click(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Off-hand right click trigger.
pub trait OffhandClick: Send + Sync {
    /// Handles an off-hand click.
    fn offhand_click(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Sneak start trigger.
pub trait Sneak: Send + Sync {
    /// Handles the start of sneaking.
    fn sneak(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Per-tick trigger while sneaking.
pub trait Sneaking: Send + Sync {
    /// Handles one sneaking tick.
    fn sneaking(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Sprint start trigger.
pub trait Sprint: Send + Sync {
    /// Handles the start of sprinting.
    fn sprint(&self, ctx: &TriggerContext) -> PowerResult;
}

/// Per-tick trigger.
pub trait Tick: Send + Sync {
    /// Handles one tick.
    fn tick(&self, ctx: &TriggerContext) -> PowerResult;
}

/// The holder was hurt.
pub trait Hurt: Send + Sync {
    /// Handles final damage taken.
    fn hurt(&self, ctx: &TriggerContext, damage: f64) -> PowerResult;
}

/// A projectile launched by the holder hit something.
pub trait ProjectileHit: Send + Sync {
    /// Handles the impact.
    fn projectile_hit(&self, ctx: &TriggerContext) -> PowerResult;
}

/// The holder hit another actor. The payload is the damage to deal.
pub trait Hit: Send + Sync {
    /// Handles an outgoing hit.
    fn hit(&self, ctx: &TriggerContext, target: ActorId, damage: f64) -> PowerResult<f64>;
}

/// The holder is about to take a hit. The payload is the damage to take.
pub trait HitTaken: Send + Sync {
    /// Handles an incoming hit.
    fn take_hit(&self, ctx: &TriggerContext, damage: f64) -> PowerResult<f64>;
}

/// The holder shot a bow. The payload is the arrow force.
pub trait BowShoot: Send + Sync {
    /// Handles a bow shot.
    fn bow_shoot(&self, ctx: &TriggerContext, force: f32) -> PowerResult<f32>;
}

/// An item was swapped into the off hand. A `true` payload cancels the swap.
pub trait OffhandItem: Send + Sync {
    /// Handles the swap.
    fn swap_to_offhand(&self, ctx: &TriggerContext) -> PowerResult<bool>;
}

/// An item was swapped into the main hand. A `true` payload cancels the swap.
pub trait MainhandItem: Send + Sync {
    /// Handles the swap.
    fn swap_to_mainhand(&self, ctx: &TriggerContext) -> PowerResult<bool>;
}

// =============================================================================
// Shape Marker
// =============================================================================

/// Ties a shape trait object type to its [`ShapeKind`].
///
/// Implemented for `dyn Plain`, `dyn RightClick` and the other shape traits.
pub trait Shape: Send + Sync + 'static {
    /// The kind this trait object type represents.
    const KIND: ShapeKind;
}

macro_rules! shape_kind {
    ($($shape:ident),* $(,)?) => {
        $(
            impl Shape for dyn $shape {
                const KIND: ShapeKind = ShapeKind::$shape;
            }
        )*
    };
}

shape_kind!(
    Plain,
    RightClick,
    LeftClick,
    OffhandClick,
    Sneak,
    Sneaking,
    Sprint,
    Tick,
    Hurt,
    ProjectileHit,
    Hit,
    HitTaken,
    BowShoot,
    OffhandItem,
    MainhandItem,
);

// =============================================================================
// Shape Views
// =============================================================================

/// The shape views one behavior instance exposes.
///
/// Each entry is an `Arc<dyn Shape>` keyed by its kind. Views share the
/// instance they were built from.
#[derive(Default)]
pub struct ShapeViews {
    views: HashMap<ShapeKind, Box<dyn Any + Send + Sync>>,
}

impl ShapeViews {
    /// Creates an empty view set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    /// Adds the view for shape `S`.
    #[must_use]
    pub fn with<S: Shape + ?Sized>(mut self, view: Arc<S>) -> Self {
        self.views.insert(S::KIND, Box::new(view));
        self
    }

    /// Returns the view for shape `S`, if exposed.
    #[must_use]
    pub fn get<S: Shape + ?Sized>(&self) -> Option<Arc<S>> {
        self.views
            .get(&S::KIND)
            .and_then(|view| view.downcast_ref::<Arc<S>>())
            .cloned()
    }

    /// Returns the set of exposed shapes.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.views
            .keys()
            .fold(CapabilitySet::empty(), |set, kind| set | kind.flag())
    }

    /// Returns the number of exposed shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns true if no shape is exposed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl fmt::Debug for ShapeViews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeViews")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
