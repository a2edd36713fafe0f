//! End-to-end tests of the registry.
//!
//! These tests drive the public surface the way a host does:
//! - Extension registration and identifier parsing
//! - Property assignment and accepted values
//! - Adapter resolution through the stock and custom bindings
//! - Overrides and override-aware instantiation
//! - Description lookup

use std::sync::Arc;

use crate::behavior::{type_id_of, Behavior, BehaviorType};
use crate::description::Description;
use crate::error::RegistryError;
use crate::identifier::Identifier;
use crate::property::{AcceptedValues, Console, Preset, PresetFn};
use crate::registry::Registry;
use crate::result::{ChainDirective, OutcomeKind, PowerResult};
use crate::shape::{ActorId, Hit, HitTaken, Plain, RightClick, ShapeKind, Tick, TriggerContext};

use super::helpers::{
    ctx, empty_registry, fixture_registry, host, sky_pack, Arrow, Beam, Broken, FireArrow,
    InfernoArrow, Misdeclared, Rescue, SkyHook, Tally,
};

fn id(name: &str) -> Identifier {
    Identifier::new("armory", name).unwrap()
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn broken_type_is_skipped_without_aborting_batch() {
    let registry = empty_registry();
    let report = registry
        .register(
            &host(),
            vec![
                BehaviorType::of::<Broken>(),
                BehaviorType::of::<Arrow>(),
                BehaviorType::of::<Rescue>(),
            ],
        )
        .unwrap();

    assert_eq!(report.registered.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].type_name.ends_with("Broken"));
    assert!(matches!(
        report.skipped[0].error,
        RegistryError::NotInstantiable { .. }
    ));
    assert!(!registry.contains(&id("broken")));
}

#[test]
fn panicking_declaration_is_skipped_without_aborting_batch() {
    let registry = empty_registry();
    let report = registry
        .register(
            &host(),
            vec![
                BehaviorType::of::<Arrow>(),
                BehaviorType::of::<Misdeclared>(),
                BehaviorType::of::<Rescue>(),
            ],
        )
        .unwrap();

    assert_eq!(report.registered, vec![id("arrow"), id("rescue")]);
    assert_eq!(report.skipped.len(), 1);
    match &report.skipped[0].error {
        RegistryError::HookPanicked { hook, reason, .. } => {
            assert_eq!(*hook, "properties");
            assert!(reason.contains("not ready"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!registry.contains(&id("misdeclared")));
    assert_eq!(registry.len(), 2);
}

#[test]
fn load_order_follows_type_names() {
    let registry = empty_registry();
    let report = registry
        .register(
            &host(),
            vec![BehaviorType::of::<Tally>(), BehaviorType::of::<Arrow>()],
        )
        .unwrap();
    let names: Vec<_> = report.registered.iter().map(Identifier::name).collect();
    assert_eq!(names, vec!["arrow", "tally"]);
}

#[test]
fn bijection_holds_across_extensions() {
    let registry = fixture_registry();
    registry
        .register(&sky_pack(), vec![BehaviorType::of::<SkyHook>()])
        .unwrap();

    for (identifier, ty) in registry.behaviors() {
        assert_eq!(registry.identifier_of(&ty), Some(identifier.clone()));
        assert_eq!(registry.resolve(&identifier).unwrap(), ty);
    }
    assert_eq!(registry.len(), 7);
    assert!(registry.has_extensions());

    let namespaces: Vec<_> = registry
        .extensions()
        .iter()
        .map(|e| e.short_name())
        .collect();
    assert_eq!(namespaces, vec!["armory", "skypack"]);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parse_and_format_roundtrip() {
    let registry = fixture_registry();
    registry
        .register(&sky_pack(), vec![BehaviorType::of::<SkyHook>()])
        .unwrap();

    for (identifier, _) in registry.behaviors() {
        let text = registry.format(&identifier);
        assert_eq!(registry.parse(&text).unwrap(), identifier);
        assert_eq!(registry.parse(&identifier.to_string()).unwrap(), identifier);
    }
    assert_eq!(registry.format(&id("arrow")), "arrow");
}

#[test]
fn parse_failures() {
    let registry = fixture_registry();
    assert!(matches!(
        registry.parse("a:b:c"),
        Err(RegistryError::MalformedIdentifier { .. })
    ));
    assert!(matches!(
        registry.parse("nowhere:arrow"),
        Err(RegistryError::UnknownExtension { .. })
    ));
    assert!(matches!(
        registry.parse_legacy("armory:arrow"),
        Err(RegistryError::MalformedIdentifier { .. })
    ));
    assert_eq!(registry.parse_legacy(" arrow ").unwrap(), id("arrow"));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn required_prefix_on_registered_type() {
    let registry = fixture_registry();
    let properties = registry.properties(&id("rescue")).unwrap();

    let ordered: Vec<_> = properties
        .iter()
        .map(|p| (p.name(), p.is_required()))
        .collect();
    assert_eq!(
        ordered,
        vec![
            ("cooldown", true),
            ("health_trigger", true),
            ("use_bed", true),
            ("in_place", false),
            ("damage_trigger", false),
        ]
    );
    assert!(registry.meta(&id("rescue")).unwrap().immutable_trigger);
}

#[test]
fn set_property_through_registry() {
    let registry = fixture_registry();
    let mut instance = registry.instantiate(&id("arrow")).unwrap();

    registry
        .set_property(&Console, instance.as_mut(), "cooldown", "20")
        .unwrap();
    let cooldown = registry.get_property(instance.as_ref(), "cooldown");
    assert_eq!(cooldown.unwrap(), Some("20".to_string()));

    let err = registry
        .set_property(&Console, instance.as_mut(), "speed", "3")
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnregisteredProperty {
            behavior: "armory:arrow".into(),
            property: "speed".into(),
        }
    );

    let err = registry
        .set_property(&Console, instance.as_mut(), "cooldown", "soon")
        .unwrap_err();
    match err {
        RegistryError::PropertyValue { property, value, .. } => {
            assert_eq!(property, "cooldown");
            assert_eq!(value, "soon");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn accepted_values_union_is_sorted_and_deduplicated() {
    let registry = fixture_registry();
    let values = registry
        .accepted_values_of(&BehaviorType::of::<Arrow>(), "mode")
        .unwrap()
        .unwrap();
    assert_eq!(values, vec!["LEFT_CLICK", "RIGHT_CLICK", "VOLLEY"]);

    assert_eq!(
        registry
            .accepted_values_of(&BehaviorType::of::<Arrow>(), "cooldown")
            .unwrap(),
        None
    );
}

#[test]
fn literal_values_come_back_as_declared() {
    let registry = fixture_registry();
    let arrow = BehaviorType::of::<Arrow>();
    let accepted = AcceptedValues::literal(&["b", "a", "a"]);
    assert_eq!(
        registry.get_accepted_values(&arrow, &accepted),
        vec!["b", "a", "a"]
    );
}

#[test]
fn provider_values_merge_with_literals() {
    let registry = fixture_registry();
    let arrow = BehaviorType::of::<Arrow>();
    let by_type: Arc<PresetFn> = Arc::new(|ty: &BehaviorType| {
        let short = ty.type_name().rsplit("::").next().unwrap_or_default();
        vec![short.to_uppercase(), "c".into(), "a".into()]
    });
    let literal = AcceptedValues::literal(&["b", "a"]);
    let accepted = literal.with_preset(Preset::Provider(by_type));
    assert_eq!(
        registry.get_accepted_values(&arrow, &accepted),
        vec!["ARROW", "a", "b", "c"]
    );
}

// =============================================================================
// Adapters
// =============================================================================

#[test]
fn stock_adapter_fires_with_cooldown() {
    let registry = fixture_registry();
    let mut arrow = registry.instantiate(&id("arrow")).unwrap();
    registry
        .set_property(&Console, arrow.as_mut(), "cooldown", "10")
        .unwrap();
    let arrow: Arc<dyn Behavior> = arrow.into();

    let click = registry.adapt_power::<dyn RightClick>(&arrow).unwrap();
    assert_eq!(click.right_click(&ctx(0)).kind(), OutcomeKind::Ok);

    let blocked = click.right_click(&ctx(5));
    assert_eq!(blocked.kind(), OutcomeKind::Cooldown);
    assert_eq!(blocked.directive(), ChainDirective::Attempted);

    assert_eq!(click.right_click(&ctx(10)).kind(), OutcomeKind::Ok);
}

#[test]
fn value_shapes_keep_their_payload() {
    let registry = fixture_registry();
    let beam: Arc<dyn Behavior> = registry.instantiate(&id("beam")).unwrap().into();

    let hit = registry.adapt_power::<dyn Hit>(&beam).unwrap();
    let result = hit.hit(&ctx(0), ActorId::new(2), 12.0);
    assert_eq!(result.kind(), OutcomeKind::Fail);
    assert_eq!(result.payload(), Some(&12.0));
}

#[test]
fn type_without_general_shapes_has_no_adapter() {
    let registry = fixture_registry();
    let rescue: Arc<dyn Behavior> = registry.instantiate(&id("rescue")).unwrap().into();
    let err = registry
        .adapt_power::<dyn RightClick>(&rescue)
        .err()
        .unwrap();
    assert_eq!(
        err,
        RegistryError::NoAdapter {
            behavior: id("rescue"),
            desired: ShapeKind::RightClick,
        }
    );
}

/// A right-click view that reports a fixed outcome.
struct Fixed(OutcomeKind);

impl RightClick for Fixed {
    fn right_click(&self, _ctx: &TriggerContext) -> PowerResult {
        PowerResult::of(self.0)
    }
}

fn bind_tick(registry: &Registry) {
    registry.register_adapter::<dyn Tick, dyn RightClick, _>(|tick| {
        Arc::new(Fixed(tick.tick(&ctx(0)).kind())) as Arc<dyn RightClick>
    });
}

#[test]
fn declared_preference_beats_registration_order() {
    // Tally declares [Tick, Plain]; Tick's adapter aborts, Plain's completes.
    for tick_first in [true, false] {
        let registry = empty_registry();
        if tick_first {
            bind_tick(&registry);
            registry.register_plain_adapters();
        } else {
            registry.register_plain_adapters();
            bind_tick(&registry);
        }
        registry
            .register(&host(), vec![BehaviorType::of::<Tally>()])
            .unwrap();

        let tally: Arc<dyn Behavior> = registry.instantiate(&id("tally")).unwrap().into();
        let click = registry.adapt_power::<dyn RightClick>(&tally).unwrap();
        assert_eq!(click.right_click(&ctx(0)).kind(), OutcomeKind::Abort);
    }
}

#[test]
fn rebinding_a_pair_replaces_it() {
    let registry = fixture_registry();
    registry.register_adapter::<dyn Plain, dyn RightClick, _>(|_| {
        Arc::new(Fixed(OutcomeKind::Noop)) as Arc<dyn RightClick>
    });
    let arrow: Arc<dyn Behavior> = registry.instantiate(&id("arrow")).unwrap().into();
    let click = registry.adapt_power::<dyn RightClick>(&arrow).unwrap();
    assert_eq!(click.right_click(&ctx(0)).kind(), OutcomeKind::Noop);
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn override_scenario() {
    let registry = fixture_registry();
    let arrow = id("arrow");
    let fire_arrow = id("firearrow");

    registry.register_override(&arrow, &fire_arrow).unwrap();
    assert_eq!(
        registry.resolve(&arrow).unwrap(),
        BehaviorType::of::<FireArrow>()
    );
    assert_eq!(registry.override_of(&arrow), Some(fire_arrow.clone()));

    let instance = registry.instantiate(&arrow).unwrap();
    assert!(BehaviorType::of::<FireArrow>().is_type_of(instance.as_ref()));
    assert_eq!(
        type_id_of(instance.as_ref()),
        BehaviorType::of::<FireArrow>().type_id()
    );

    // The record itself is not redirected.
    assert_eq!(
        registry.record(&arrow).unwrap().ty(),
        BehaviorType::of::<Arrow>()
    );

    let err = registry.register_override(&arrow, &fire_arrow).unwrap_err();
    assert!(matches!(err, RegistryError::OverrideConflict { .. }));
    assert_eq!(
        registry.resolve(&arrow).unwrap(),
        BehaviorType::of::<FireArrow>()
    );
}

#[test]
fn override_requires_subtype() {
    let registry = fixture_registry();

    let err = registry
        .register_override(&id("arrow"), &id("beam"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::OverrideTypeMismatch { .. }));
    assert_eq!(registry.override_of(&id("arrow")), None);
    assert_eq!(
        registry.resolve(&id("arrow")).unwrap(),
        BehaviorType::of::<Arrow>()
    );

    // Parent cannot stand in for child.
    let err = registry
        .register_override(&id("firearrow"), &id("arrow"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::OverrideTypeMismatch { .. }));
}

#[test]
fn override_of_unknown_and_self() {
    let registry = fixture_registry();
    assert!(matches!(
        registry.register_override(&id("arrow"), &id("ghost")),
        Err(RegistryError::UnknownBehavior { .. })
    ));
    assert!(matches!(
        registry.register_override(&id("arrow"), &id("arrow")),
        Err(RegistryError::OverrideConflict { .. })
    ));
}

#[test]
fn overrides_do_not_chain() {
    let registry = fixture_registry();
    registry
        .register_override(&id("arrow"), &id("firearrow"))
        .unwrap();
    registry
        .register_override(&id("firearrow"), &id("infernoarrow"))
        .unwrap();

    assert_eq!(
        registry.resolve(&id("arrow")).unwrap(),
        BehaviorType::of::<FireArrow>()
    );
    assert_eq!(
        registry.resolve(&id("firearrow")).unwrap(),
        BehaviorType::of::<InfernoArrow>()
    );
}

// =============================================================================
// Descriptions
// =============================================================================

#[test]
fn descriptions_route_by_namespace() {
    let registry = fixture_registry();
    registry
        .register(&sky_pack(), vec![BehaviorType::of::<SkyHook>()])
        .unwrap();
    registry
        .add_description_resolver(&sky_pack(), |id, property| match property {
            None => Some(format!("{} from the sky pack", id.name())),
            Some("hook_distance") => Some("how far the hook reaches".into()),
            Some(_) => None,
        })
        .unwrap();

    let hook = registry.parse("skypack:skyhook").unwrap();
    assert_eq!(
        registry.get_description(&hook, None).text(),
        Some("skyhook from the sky pack")
    );
    assert_eq!(
        registry.get_description(&hook, Some("rail")),
        Description::NoEntry
    );
    assert_eq!(
        registry.get_description(&id("arrow"), None),
        Description::NoResolver
    );
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn rescue_outcomes_carry_damage() {
    let registry = fixture_registry();
    let mut rescue = registry.instantiate(&id("rescue")).unwrap();
    registry
        .set_property(&Console, rescue.as_mut(), "damage_trigger", "5.5")
        .unwrap();
    let rescue = rescue
        .as_ref()
        .as_any()
        .downcast_ref::<Rescue>()
        .expect("instantiated a rescue");

    let light = rescue.take_hit(&ctx(0), 2.0);
    assert_eq!(light.directive(), ChainDirective::Continue);

    let heavy = rescue.take_hit(&ctx(0), 8.0);
    assert!(heavy.is_ok());
    assert_eq!(heavy.payload(), Some(&0.0));
    assert_eq!(heavy.clone().discard().kind(), OutcomeKind::Ok);
    assert_eq!(heavy.with("cancelled").payload(), Some(&"cancelled"));
}

#[test]
fn unregistered_instance_cannot_adapt() {
    let registry = empty_registry();
    let beam: Arc<dyn Behavior> = Arc::new(Beam);
    assert!(matches!(
        registry.adapt_power::<dyn RightClick>(&beam),
        Err(RegistryError::UnknownBehavior { .. })
    ));
}
