//! Stock adapters from the general [`Plain`] shape.
//!
//! A behavior that only knows how to `fire` can still be bound to any
//! trigger. The wrapper fires the behavior and, for shapes that carry a
//! value, passes the incoming value through unchanged under the fired
//! outcome. Swap shapes never cancel the swap.

use std::sync::Arc;

use crate::adapter::AdapterTable;
use crate::result::PowerResult;
use crate::shape::{
    ActorId, BowShoot, Hit, HitTaken, Hurt, LeftClick, MainhandItem, OffhandClick, OffhandItem,
    Plain, ProjectileHit, RightClick, Sneak, Sneaking, Sprint, Tick, TriggerContext,
};

/// A [`Plain`] behavior seen through a specific trigger shape.
pub struct FromPlain(Arc<dyn Plain>);

impl FromPlain {
    /// Wraps a plain view.
    #[must_use]
    pub fn new(plain: Arc<dyn Plain>) -> Self {
        Self(plain)
    }
}

macro_rules! fire_through {
    ($($shape:ident :: $method:ident),* $(,)?) => {
        $(
            impl $shape for FromPlain {
                fn $method(&self, ctx: &TriggerContext) -> PowerResult {
                    self.0.fire(ctx)
                }
            }
        )*
    };
}

fire_through!(
    RightClick::right_click,
    LeftClick::left_click,
    OffhandClick::offhand_click,
    Sneak::sneak,
    Sneaking::sneaking,
    Sprint::sprint,
    Tick::tick,
    ProjectileHit::projectile_hit,
);

impl Hurt for FromPlain {
    fn hurt(&self, ctx: &TriggerContext, _damage: f64) -> PowerResult {
        self.0.fire(ctx)
    }
}

impl Hit for FromPlain {
    fn hit(&self, ctx: &TriggerContext, _target: ActorId, damage: f64) -> PowerResult<f64> {
        self.0.fire(ctx).with(damage)
    }
}

impl HitTaken for FromPlain {
    fn take_hit(&self, ctx: &TriggerContext, damage: f64) -> PowerResult<f64> {
        self.0.fire(ctx).with(damage)
    }
}

impl BowShoot for FromPlain {
    fn bow_shoot(&self, ctx: &TriggerContext, force: f32) -> PowerResult<f32> {
        self.0.fire(ctx).with(force)
    }
}

impl OffhandItem for FromPlain {
    fn swap_to_offhand(&self, ctx: &TriggerContext) -> PowerResult<bool> {
        self.0.fire(ctx).with(false)
    }
}

impl MainhandItem for FromPlain {
    fn swap_to_mainhand(&self, ctx: &TriggerContext) -> PowerResult<bool> {
        self.0.fire(ctx).with(false)
    }
}

macro_rules! bind_from_plain {
    ($table:expr, $($shape:ident),* $(,)?) => {{
        let mut bound = 0;
        $(
            $table.insert::<dyn Plain, dyn $shape, _>(|plain| {
                Arc::new(FromPlain::new(plain)) as Arc<dyn $shape>
            });
            bound += 1;
        )*
        bound
    }};
}

/// Binds `Plain` to every trigger shape in `table`.
///
/// Returns the number of bindings installed.
pub fn install(table: &mut AdapterTable) -> usize {
    bind_from_plain!(
        table,
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
    )
}
