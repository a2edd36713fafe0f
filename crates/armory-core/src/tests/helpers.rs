//! Fixture behaviors and registry setup shared by the crate-level tests.
//!
//! The fixtures mirror the shapes real behaviors take:
//! - [`Arrow`]: plain fire plus click triggers, general shape `Plain`
//! - [`FireArrow`]: a declared subtype of `Arrow` that also ticks
//! - [`InfernoArrow`]: a declared subtype of `FireArrow`
//! - [`Rescue`]: hurt and hit-taken only, immutable trigger, required prefix
//! - [`Tally`]: plain and tick, preferring `Tick` as its general shape
//! - [`Beam`]: same shapes as `Arrow` but unrelated by type
//! - [`Broken`]: cannot be constructed
//! - [`Misdeclared`]: constructs, but panics while declaring its properties

use std::sync::Arc;

use crate::behavior::{Behavior, BehaviorClass, BehaviorMeta, BehaviorType};
use crate::config::RegistryConfig;
use crate::cooldown::Cooldowns;
use crate::namespace::Extension;
use crate::property::{AcceptedValues, Preset, PropertyDescriptor};
use crate::registry::Registry;
use crate::result::PowerResult;
use crate::shape::{
    ActorId, HitTaken, Hurt, LeftClick, Plain, RightClick, ShapeKind, ShapeViews, Tick,
    TriggerContext,
};

// =============================================================================
// Setup
// =============================================================================

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// The host extension.
pub fn host() -> Extension {
    Extension::new("Armory")
}

/// A third-party extension.
pub fn sky_pack() -> Extension {
    Extension::new("SkyPack")
}

/// Trigger context for actor 1 at `tick`.
pub fn ctx(tick: u64) -> TriggerContext {
    TriggerContext::new(ActorId::new(1), tick)
}

/// An empty registry with default configuration.
pub fn empty_registry() -> Registry {
    init_tracing();
    Registry::new(RegistryConfig::default()).expect("default config is valid")
}

/// A registry with stock adapters and every host fixture registered.
pub fn fixture_registry() -> Registry {
    let registry = empty_registry();
    registry.register_plain_adapters();
    let report = registry
        .register(&host(), host_types())
        .expect("host namespace is valid");
    assert!(
        report.is_complete(),
        "unexpected skips: {:?}",
        report.skipped
    );
    registry
}

/// Every constructible host fixture.
pub fn host_types() -> Vec<BehaviorType> {
    vec![
        BehaviorType::of::<Arrow>(),
        BehaviorType::of::<FireArrow>(),
        BehaviorType::of::<InfernoArrow>(),
        BehaviorType::of::<Rescue>(),
        BehaviorType::of::<Tally>(),
        BehaviorType::of::<Beam>(),
    ]
}

fn cost_property<T: Behavior>(
    get: fn(&T) -> &i32,
    set: fn(&mut T) -> &mut i32,
) -> PropertyDescriptor {
    PropertyDescriptor::field("cost", i32::MAX, get, set)
}

// =============================================================================
// Arrow
// =============================================================================

/// Fires on click; blocked while cooling down.
#[derive(Default)]
pub struct Arrow {
    pub cooldown: u64,
    pub cost: i32,
    pub mode: String,
    cooldowns: Cooldowns,
}

impl Plain for Arrow {
    fn fire(&self, ctx: &TriggerContext) -> PowerResult {
        if !self.cooldowns.check_cooldown(ctx.actor, "arrow", self.cooldown, ctx.tick) {
            return PowerResult::cooldown();
        }
        PowerResult::ok()
    }
}

impl RightClick for Arrow {
    fn right_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl LeftClick for Arrow {
    fn left_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl Behavior for Arrow {
    fn name(&self) -> &'static str {
        "arrow"
    }

    fn display_text(&self) -> String {
        format!("fires an arrow, {} ticks cooldown", self.cooldown)
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Plain>(self.clone())
            .with::<dyn RightClick>(self.clone())
            .with::<dyn LeftClick>(self)
    }
}

impl BehaviorClass for Arrow {
    fn construct() -> Result<Self, String> {
        Ok(Self::default())
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new()
            .default_trigger(ShapeKind::RightClick)
            .general(&[ShapeKind::Plain])
    }

    fn properties() -> Vec<PropertyDescriptor> {
        let modes = AcceptedValues::literal(&["RIGHT_CLICK", "VOLLEY", "LEFT_CLICK"]);
        vec![
            PropertyDescriptor::field(
                "cooldown",
                0,
                |a: &Arrow| &a.cooldown,
                |a: &mut Arrow| &mut a.cooldown,
            ),
            cost_property::<Arrow>(|a| &a.cost, |a| &mut a.cost),
            PropertyDescriptor::field(
                "mode",
                1,
                |arrow: &Arrow| &arrow.mode,
                |arrow: &mut Arrow| &mut arrow.mode,
            )
            .accepting(modes.with_preset(Preset::Triggers)),
        ]
    }
}

// =============================================================================
// Fire Arrow
// =============================================================================

/// An arrow that also burns every tick.
#[derive(Default)]
pub struct FireArrow {
    pub cooldown: u64,
    pub cost: i32,
    pub burn_ticks: u32,
}

impl Plain for FireArrow {
    fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::ok()
    }
}

impl RightClick for FireArrow {
    fn right_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl LeftClick for FireArrow {
    fn left_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl Tick for FireArrow {
    fn tick(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::noop()
    }
}

impl Behavior for FireArrow {
    fn name(&self) -> &'static str {
        "firearrow"
    }

    fn display_text(&self) -> String {
        format!("fires a burning arrow for {} ticks", self.burn_ticks)
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Plain>(self.clone())
            .with::<dyn RightClick>(self.clone())
            .with::<dyn LeftClick>(self.clone())
            .with::<dyn Tick>(self)
    }
}

impl BehaviorClass for FireArrow {
    fn construct() -> Result<Self, String> {
        Ok(Self {
            burn_ticks: 60,
            ..Self::default()
        })
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new()
            .default_trigger(ShapeKind::RightClick)
            .general(&[ShapeKind::Plain])
            .extends::<Arrow>()
    }

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::field(
                "cooldown",
                0,
                |a: &FireArrow| &a.cooldown,
                |a: &mut FireArrow| &mut a.cooldown,
            ),
            cost_property::<FireArrow>(|a| &a.cost, |a| &mut a.cost),
            PropertyDescriptor::field(
                "burn_ticks",
                1,
                |a: &FireArrow| &a.burn_ticks,
                |a: &mut FireArrow| &mut a.burn_ticks,
            ),
        ]
    }
}

// =============================================================================
// Inferno Arrow
// =============================================================================

/// A fire arrow that never cools down.
#[derive(Default)]
pub struct InfernoArrow;

impl Plain for InfernoArrow {
    fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::ok()
    }
}

impl RightClick for InfernoArrow {
    fn right_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl LeftClick for InfernoArrow {
    fn left_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl Tick for InfernoArrow {
    fn tick(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl Behavior for InfernoArrow {
    fn name(&self) -> &'static str {
        "infernoarrow"
    }

    fn display_text(&self) -> String {
        "fires burning arrows without pause".into()
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Plain>(self.clone())
            .with::<dyn RightClick>(self.clone())
            .with::<dyn LeftClick>(self.clone())
            .with::<dyn Tick>(self)
    }
}

impl BehaviorClass for InfernoArrow {
    fn construct() -> Result<Self, String> {
        Ok(Self)
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new()
            .general(&[ShapeKind::Plain])
            .extends::<FireArrow>()
    }
}

// =============================================================================
// Rescue
// =============================================================================

/// Cancels a lethal hit.
pub struct Rescue {
    pub cooldown: u64,
    pub health_trigger: i32,
    pub use_bed: bool,
    pub in_place: bool,
    pub damage_trigger: f64,
}

impl Hurt for Rescue {
    fn hurt(&self, _ctx: &TriggerContext, damage: f64) -> PowerResult {
        if damage < self.damage_trigger {
            PowerResult::noop()
        } else {
            PowerResult::ok()
        }
    }
}

impl HitTaken for Rescue {
    fn take_hit(&self, _ctx: &TriggerContext, damage: f64) -> PowerResult<f64> {
        if damage < self.damage_trigger {
            PowerResult::noop()
        } else {
            PowerResult::ok_with(0.0)
        }
    }
}

impl Behavior for Rescue {
    fn name(&self) -> &'static str {
        "rescue"
    }

    fn display_text(&self) -> String {
        format!(
            "rescues below {} health",
            f64::from(self.health_trigger) / 2.0
        )
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Hurt>(self.clone())
            .with::<dyn HitTaken>(self)
    }
}

impl BehaviorClass for Rescue {
    fn construct() -> Result<Self, String> {
        Ok(Self {
            cooldown: 0,
            health_trigger: 4,
            use_bed: true,
            in_place: false,
            damage_trigger: 1024.0,
        })
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new().immutable_trigger()
    }

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::field(
                "in_place",
                3,
                |r: &Rescue| &r.in_place,
                |r: &mut Rescue| &mut r.in_place,
            ),
            PropertyDescriptor::field(
                "use_bed",
                2,
                |r: &Rescue| &r.use_bed,
                |r: &mut Rescue| &mut r.use_bed,
            )
            .required(),
            PropertyDescriptor::field(
                "health_trigger",
                1,
                |r: &Rescue| &r.health_trigger,
                |r: &mut Rescue| &mut r.health_trigger,
            ),
            PropertyDescriptor::field(
                "cooldown",
                0,
                |r: &Rescue| &r.cooldown,
                |r: &mut Rescue| &mut r.cooldown,
            ),
            PropertyDescriptor::field(
                "damage_trigger",
                i32::MAX,
                |r: &Rescue| &r.damage_trigger,
                |r: &mut Rescue| &mut r.damage_trigger,
            ),
        ]
    }
}

// =============================================================================
// Tally
// =============================================================================

/// Counts score; prefers to be driven through its tick view.
#[derive(Default)]
pub struct Tally;

impl Plain for Tally {
    fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::ok()
    }
}

impl Tick for Tally {
    fn tick(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::abort()
    }
}

impl Behavior for Tally {
    fn name(&self) -> &'static str {
        "tally"
    }

    fn display_text(&self) -> String {
        "adds to the score".into()
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Plain>(self.clone())
            .with::<dyn Tick>(self)
    }
}

impl BehaviorClass for Tally {
    fn construct() -> Result<Self, String> {
        Ok(Self)
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new().general(&[ShapeKind::Tick, ShapeKind::Plain])
    }
}

// =============================================================================
// Beam
// =============================================================================

/// Same shapes as [`Arrow`], unrelated type.
#[derive(Default)]
pub struct Beam;

impl Plain for Beam {
    fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::fail()
    }
}

impl RightClick for Beam {
    fn right_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl LeftClick for Beam {
    fn left_click(&self, ctx: &TriggerContext) -> PowerResult {
        self.fire(ctx)
    }
}

impl Behavior for Beam {
    fn name(&self) -> &'static str {
        "beam"
    }

    fn display_text(&self) -> String {
        "a beam".into()
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new()
            .with::<dyn Plain>(self.clone())
            .with::<dyn RightClick>(self.clone())
            .with::<dyn LeftClick>(self)
    }
}

impl BehaviorClass for Beam {
    fn construct() -> Result<Self, String> {
        Ok(Self)
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new().general(&[ShapeKind::Plain])
    }
}

// =============================================================================
// Sky Hook
// =============================================================================

/// Third-party behavior registered by [`sky_pack`].
pub struct SkyHook {
    pub cooldown: u64,
    pub hook_distance: i32,
    pub rail: String,
}

impl Plain for SkyHook {
    fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::ok()
    }
}

impl Behavior for SkyHook {
    fn name(&self) -> &'static str {
        "skyhook"
    }

    fn display_text(&self) -> String {
        format!("hooks rails up to {} blocks away", self.hook_distance)
    }

    fn views(self: Arc<Self>) -> ShapeViews {
        ShapeViews::new().with::<dyn Plain>(self)
    }
}

impl BehaviorClass for SkyHook {
    fn construct() -> Result<Self, String> {
        Ok(Self {
            cooldown: 0,
            hook_distance: 10,
            rail: "glass".into(),
        })
    }

    fn meta() -> BehaviorMeta {
        BehaviorMeta::new()
            .default_trigger(ShapeKind::RightClick)
            .general(&[ShapeKind::Plain])
    }

    fn properties() -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::field(
                "rail",
                0,
                |s: &SkyHook| &s.rail,
                |s: &mut SkyHook| &mut s.rail,
            ),
            PropertyDescriptor::field(
                "hook_distance",
                1,
                |s: &SkyHook| &s.hook_distance,
                |s: &mut SkyHook| &mut s.hook_distance,
            )
            .required(),
            PropertyDescriptor::field(
                "cooldown",
                i32::MAX,
                |s: &SkyHook| &s.cooldown,
                |s: &mut SkyHook| &mut s.cooldown,
            ),
        ]
    }
}

// =============================================================================
// Broken
// =============================================================================

/// Always fails to construct.
pub struct Broken;

impl Behavior for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn display_text(&self) -> String {
        String::new()
    }
}

impl BehaviorClass for Broken {
    fn construct() -> Result<Self, String> {
        Err("missing required configuration".into())
    }
}

// =============================================================================
// Misdeclared
// =============================================================================

/// Constructs fine; its property table panics.
pub struct Misdeclared;

impl Behavior for Misdeclared {
    fn name(&self) -> &'static str {
        "misdeclared"
    }

    fn display_text(&self) -> String {
        String::new()
    }
}

impl BehaviorClass for Misdeclared {
    fn construct() -> Result<Self, String> {
        Ok(Self)
    }

    fn properties() -> Vec<PropertyDescriptor> {
        panic!("property table is not ready")
    }
}
