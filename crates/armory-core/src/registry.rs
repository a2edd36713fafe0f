//! The behavior registry.
//!
//! [`Registry`] owns every table the engine consults at runtime:
//!
//! - the namespace table of known extensions,
//! - the identifier to type bijection with per-type records,
//! - the adapter table,
//! - the override graph,
//! - the description resolvers.
//!
//! # Architecture
//!
//! All tables live in one immutable snapshot behind a `RwLock<Arc<_>>`.
//! Readers clone the `Arc` and work on a consistent view without holding the
//! lock. Writers serialize on a separate mutex, clone the snapshot, mutate
//! the clone and swap it in. A failed write never swaps, so a registration or
//! override either lands completely or not at all.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use armory_core::behavior::{Behavior, BehaviorClass, BehaviorMeta, BehaviorType};
//! use armory_core::config::RegistryConfig;
//! use armory_core::namespace::Extension;
//! use armory_core::registry::Registry;
//! use armory_core::result::PowerResult;
//! use armory_core::shape::{Plain, RightClick, ShapeKind, ShapeViews, TriggerContext, ActorId};
//!
//! struct Flare;
//!
//! impl Plain for Flare {
//!     fn fire(&self, _ctx: &TriggerContext) -> PowerResult {
//!         PowerResult::ok()
//!     }
//! }
//!
//! impl Behavior for Flare {
//!     fn name(&self) -> &'static str {
//!         "flare"
//!     }
//!     fn display_text(&self) -> String {
//!         "a flare".into()
//!     }
//!     fn views(self: Arc<Self>) -> ShapeViews {
//!         ShapeViews::new().with::<dyn Plain>(self)
//!     }
//! }
//!
//! impl BehaviorClass for Flare {
//!     fn construct() -> Result<Self, String> {
//!         Ok(Flare)
//!     }
//!     fn meta() -> BehaviorMeta {
//!         BehaviorMeta::new().general(&[ShapeKind::Plain])
//!     }
//! }
//!
//! let registry = Registry::new(RegistryConfig::default()).unwrap();
//! registry.register_plain_adapters();
//!
//! let report = registry
//!     .register(&Extension::new("Armory"), vec![BehaviorType::of::<Flare>()])
//!     .unwrap();
//! assert_eq!(report.registered.len(), 1);
//!
//! let id = registry.parse("flare").unwrap();
//! let flare: Arc<dyn Behavior> = registry.instantiate(&id).unwrap().into();
//! let click = registry.adapt_power::<dyn RightClick>(&flare).unwrap();
//! assert!(click.right_click(&TriggerContext::new(ActorId::new(1), 0)).is_ok());
//! ```

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};

use crate::adapter::AdapterTable;
use crate::behavior::{type_id_of, Behavior, BehaviorMeta, BehaviorType};
use crate::config::RegistryConfig;
use crate::description::{Description, DescriptionTable};
use crate::error::{RegistryError, RegistryResult};
use crate::identifier::Identifier;
use crate::namespace::{Extension, NamespaceTable};
use crate::override_graph::{Endpoint, OverrideGraph};
use crate::plain_adapters;
use crate::property::{extract, AcceptedValues, Instigator, Preset, PropertyTable};
use crate::shape::{CapabilitySet, Shape};

// =============================================================================
// Records
// =============================================================================

/// Everything the registry knows about one registered behavior type.
#[derive(Debug, Clone)]
pub struct BehaviorRecord {
    id: Identifier,
    ty: BehaviorType,
    meta: BehaviorMeta,
    properties: Arc<PropertyTable>,
    capabilities: CapabilitySet,
}

impl BehaviorRecord {
    /// Returns the registered identifier.
    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the type handle.
    #[must_use]
    pub fn ty(&self) -> BehaviorType {
        self.ty
    }

    /// Returns the declared metadata.
    #[must_use]
    pub fn meta(&self) -> &BehaviorMeta {
        &self.meta
    }

    /// Returns the extracted properties.
    #[must_use]
    pub fn properties(&self) -> &Arc<PropertyTable> {
        &self.properties
    }

    /// Returns the shapes the prototype exposed.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint {
            id: self.id.clone(),
            ty: self.ty,
            capabilities: self.capabilities,
        }
    }
}

/// A type left out of a registration batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedType {
    /// Fully qualified type name.
    pub type_name: &'static str,
    /// Why it was skipped.
    pub error: RegistryError,
}

/// Outcome of one [`Registry::register`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Identifiers registered, in load order.
    pub registered: Vec<Identifier>,
    /// Types that were skipped, in load order.
    pub skipped: Vec<SkippedType>,
}

impl RegistrationReport {
    /// Returns true if no type was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

#[derive(Clone)]
struct State {
    namespaces: NamespaceTable,
    records: HashMap<TypeId, Arc<BehaviorRecord>>,
    by_id: BTreeMap<Identifier, TypeId>,
    adapters: AdapterTable,
    overrides: OverrideGraph,
    descriptions: DescriptionTable,
}

impl State {
    fn record(&self, id: &Identifier) -> RegistryResult<&Arc<BehaviorRecord>> {
        self.by_id
            .get(id)
            .and_then(|type_id| self.records.get(type_id))
            .ok_or_else(|| RegistryError::UnknownBehavior { id: id.clone() })
    }

    fn record_of(&self, ty: &BehaviorType) -> Option<&Arc<BehaviorRecord>> {
        self.records.get(&ty.type_id())
    }

    /// Looks up the record of a live instance.
    fn record_for(&self, behavior: &dyn Behavior) -> RegistryResult<&Arc<BehaviorRecord>> {
        if let Some(record) = self.records.get(&type_id_of(behavior)) {
            return Ok(record);
        }
        let id = Identifier::new(self.namespaces.host(), behavior.name())?;
        Err(RegistryError::UnknownBehavior { id })
    }

    /// Builds the record for `ty`, checking it against what is bound.
    fn prepare(&self, extension: &Extension, ty: BehaviorType) -> RegistryResult<BehaviorRecord> {
        let prototype: Arc<dyn Behavior> = Arc::from(ty.instantiate()?);
        let name = ty.guard("name", || prototype.name().to_string())?;
        let id = extension.key(&name)?;

        if let Some(existing) = self.by_id.get(&id).and_then(|t| self.records.get(t)) {
            return Err(RegistryError::DuplicateIdentifier {
                id,
                existing: existing.ty.type_name().to_string(),
            });
        }
        if let Some(existing) = self.record_of(&ty) {
            return Err(RegistryError::DuplicateIdentifier {
                id: existing.id.clone(),
                existing: ty.type_name().to_string(),
            });
        }

        let properties = extract(ty.guard("properties", || ty.declared_properties())?)?;
        let meta = ty.guard("meta", || ty.meta())?;
        let capabilities = ty.guard("views", || prototype.views().capabilities())?;
        Ok(BehaviorRecord {
            id,
            ty,
            meta,
            properties: Arc::new(properties),
            capabilities,
        })
    }

    fn insert(&mut self, record: BehaviorRecord) {
        let type_id = record.ty.type_id();
        self.by_id.insert(record.id.clone(), type_id);
        self.records.insert(type_id, Arc::new(record));
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Registry of behaviors, adapters, overrides and descriptions.
///
/// # Thread Safety
///
/// `Registry` is `Send + Sync`. Every method takes `&self`; share it behind
/// an `Arc`.
pub struct Registry {
    config: RegistryConfig,
    state: RwLock<Arc<State>>,
    writer: Mutex<()>,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        let host = Extension::new(&config.host_namespace);
        let namespaces = NamespaceTable::new(host).map_err(|err| RegistryError::InvalidConfig {
            reason: err.to_string(),
        })?;
        let state = State {
            namespaces,
            records: HashMap::new(),
            by_id: BTreeMap::new(),
            adapters: AdapterTable::new(),
            overrides: OverrideGraph::new(),
            descriptions: DescriptionTable::new(),
        };
        Ok(Self {
            config,
            state: RwLock::new(Arc::new(state)),
            writer: Mutex::new(()),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn snapshot(&self) -> Arc<State> {
        Arc::clone(&self.state.read())
    }

    /// Applies an infallible change.
    fn commit<R>(&self, change: impl FnOnce(&mut State) -> R) -> R {
        let _writer = self.writer.lock();
        let mut next = State::clone(&self.snapshot());
        let out = change(&mut next);
        *self.state.write() = Arc::new(next);
        out
    }

    /// Applies a change, discarding it on error.
    fn try_commit<R>(
        &self,
        change: impl FnOnce(&mut State) -> RegistryResult<R>,
    ) -> RegistryResult<R> {
        let _writer = self.writer.lock();
        let mut next = State::clone(&self.snapshot());
        let out = change(&mut next)?;
        *self.state.write() = Arc::new(next);
        Ok(out)
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers the concrete types in `types` under `extension`.
    ///
    /// Types are processed in type-name order. Abstract types are ignored.
    /// A type whose prototype cannot be built, whose name is not a valid
    /// identifier, whose properties clash, or whose identifier or type is
    /// already bound is skipped and listed in the report; the rest of the
    /// batch still registers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedIdentifier`] if the extension's
    /// short-name is not a valid namespace. Nothing is registered then.
    pub fn register(
        &self,
        extension: &Extension,
        mut types: Vec<BehaviorType>,
    ) -> RegistryResult<RegistrationReport> {
        types.sort_by_key(BehaviorType::type_name);
        types.dedup();

        let report = self.try_commit(|state| {
            state.namespaces.insert(extension.clone())?;
            let mut report = RegistrationReport::default();
            for ty in types {
                if ty.is_abstract() {
                    trace!(
                        type_name = ty.type_name(),
                        "ignoring abstract behavior type"
                    );
                    continue;
                }
                match state.prepare(extension, ty) {
                    Ok(record) => {
                        debug!(
                            id = %record.id,
                            type_name = ty.type_name(),
                            properties = record.properties.len(),
                            "registered behavior"
                        );
                        report.registered.push(record.id.clone());
                        state.insert(record);
                    }
                    Err(error) => {
                        warn!(type_name = ty.type_name(), %error, "skipping behavior type");
                        report.skipped.push(SkippedType {
                            type_name: ty.type_name(),
                            error,
                        });
                    }
                }
            }
            Ok(report)
        })?;

        info!(
            extension = extension.name(),
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            "registered extension behaviors"
        );
        Ok(report)
    }

    /// Binds an adapter from shape `G` to shape `S`. The last binding for a
    /// pair wins.
    pub fn register_adapter<G, S, F>(&self, convert: F)
    where
        G: Shape + ?Sized,
        S: Shape + ?Sized,
        F: Fn(Arc<G>) -> Arc<S> + Send + Sync + 'static,
    {
        let replaced = self.commit(|state| state.adapters.insert::<G, S, F>(convert));
        debug!(general = %G::KIND, specific = %S::KIND, replaced, "bound adapter");
    }

    /// Binds the stock adapters from `Plain` to every trigger shape.
    ///
    /// Returns the number of bindings installed.
    pub fn register_plain_adapters(&self) -> usize {
        let installed = self.commit(|state| plain_adapters::install(&mut state.adapters));
        debug!(installed, "bound plain adapters");
        installed
    }

    /// Makes `origin` resolve to `replacement`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownBehavior`] if either identifier is unbound.
    /// - [`RegistryError::OverrideConflict`] for a self-loop or an origin
    ///   that is already overridden.
    /// - [`RegistryError::OverrideTypeMismatch`] when the replacement is not
    ///   a behavioral subtype of the origin.
    pub fn register_override(
        &self,
        origin: &Identifier,
        replacement: &Identifier,
    ) -> RegistryResult<()> {
        self.try_commit(|state| {
            let from = state.record(origin)?.endpoint();
            let to = state.record(replacement)?.endpoint();
            state.overrides.insert(&from, &to)
        })?;
        info!(%origin, %replacement, "registered override");
        Ok(())
    }

    /// Installs a description resolver for `extension` in the default
    /// locale.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownExtension`] if the extension has not
    /// registered.
    pub fn add_description_resolver<F>(
        &self,
        extension: &Extension,
        resolver: F,
    ) -> RegistryResult<()>
    where
        F: Fn(&Identifier, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        let locale = self.config.default_locale.clone();
        self.add_description_resolver_for(extension, &locale, resolver)
    }

    /// Installs a description resolver for `extension` in `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownExtension`] if the extension has not
    /// registered.
    pub fn add_description_resolver_for<F>(
        &self,
        extension: &Extension,
        locale: &str,
        resolver: F,
    ) -> RegistryResult<()>
    where
        F: Fn(&Identifier, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        let namespace = extension.short_name();
        self.try_commit(|state| {
            if state.namespaces.get(&namespace).is_none() {
                return Err(RegistryError::UnknownExtension {
                    namespace: namespace.clone(),
                });
            }
            state.descriptions.insert(&namespace, locale, resolver);
            Ok(())
        })?;
        debug!(namespace = %namespace, locale, "installed description resolver");
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the type bound to `id`, following an override once.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownBehavior`] if nothing is bound.
    pub fn resolve(&self, id: &Identifier) -> RegistryResult<BehaviorType> {
        let state = self.snapshot();
        let target = state.overrides.substitute(id);
        state
            .record(target)
            .map(|record| record.ty)
            .map_err(|_| RegistryError::UnknownBehavior { id: id.clone() })
    }

    /// Parses identifier text against the known extensions.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownExtension`] or
    /// [`RegistryError::MalformedIdentifier`].
    pub fn parse(&self, input: &str) -> RegistryResult<Identifier> {
        self.snapshot().namespaces.parse(input)
    }

    /// Parses the legacy unqualified form.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MalformedIdentifier`] if the input is qualified.
    pub fn parse_legacy(&self, input: &str) -> RegistryResult<Identifier> {
        self.snapshot().namespaces.parse_legacy(input)
    }

    /// Formats `id`, omitting the host namespace.
    #[must_use]
    pub fn format(&self, id: &Identifier) -> String {
        self.snapshot().namespaces.format_short(id)
    }

    /// Creates a fresh instance of whatever `id` resolves to.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownBehavior`] or
    /// [`RegistryError::NotInstantiable`].
    pub fn instantiate(&self, id: &Identifier) -> RegistryResult<Box<dyn Behavior>> {
        self.resolve(id)?.instantiate()
    }

    /// Converts `behavior` into shape `S`.
    ///
    /// Walks the type's declared general shapes, most preferred first,
    /// skipping those the instance does not expose, and uses the first
    /// adapter bound to `S`. There is no shortcut for instances that already
    /// expose `S`; bind an adapter for that too.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownBehavior`] if the instance's type is not
    ///   registered.
    /// - [`RegistryError::NoAdapter`] if no applicable binding exists.
    pub fn adapt_power<S: Shape + ?Sized>(
        &self,
        behavior: &Arc<dyn Behavior>,
    ) -> RegistryResult<Arc<S>> {
        let state = self.snapshot();
        let record = state.record_for(behavior.as_ref())?;
        let views = Arc::clone(behavior).views();
        let general_shapes = &record.meta.general_shapes;
        match state.adapters.resolve::<S>(general_shapes, &views) {
            Some((general, view)) => {
                trace!(id = %record.id, %general, desired = %S::KIND, "adapted behavior");
                Ok(view)
            }
            None => Err(RegistryError::NoAdapter {
                behavior: record.id.clone(),
                desired: S::KIND,
            }),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Decodes `raw` into the property `name` of `behavior`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownBehavior`] if the type is not registered.
    /// - [`RegistryError::UnregisteredProperty`] if the type declares no such
    ///   property.
    /// - [`RegistryError::PropertyValue`] if the codec rejects `raw`.
    pub fn set_property(
        &self,
        instigator: &dyn Instigator,
        behavior: &mut dyn Behavior,
        name: &str,
        raw: &str,
    ) -> RegistryResult<()> {
        let state = self.snapshot();
        let record = state.record_for(behavior)?;
        let property = record
            .properties
            .get(name)
            .ok_or_else(|| unregistered(record, name))?;
        property.assign(instigator, behavior, raw)?;
        trace!(
            id = %record.id,
            property = name,
            value = raw,
            instigator = instigator.name(),
            "set property"
        );
        Ok(())
    }

    /// Encodes the current value of property `name` of `behavior`.
    ///
    /// Returns `None` for properties with no backing field.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownBehavior`] or
    /// [`RegistryError::UnregisteredProperty`].
    pub fn get_property(
        &self,
        behavior: &dyn Behavior,
        name: &str,
    ) -> RegistryResult<Option<String>> {
        let state = self.snapshot();
        let record = state.record_for(behavior)?;
        let property = record
            .properties
            .get(name)
            .ok_or_else(|| unregistered(record, name))?;
        Ok(property.read(behavior))
    }

    /// Expands `accepted` for `ty`.
    ///
    /// Without a preset the literal list is returned as declared. With one,
    /// the result is the sorted, deduplicated union of the literal list and
    /// the preset's values. The `Triggers` preset uses the capabilities
    /// recorded at registration; an unregistered type has none.
    #[must_use]
    pub fn get_accepted_values(&self, ty: &BehaviorType, accepted: &AcceptedValues) -> Vec<String> {
        let computed: Vec<String> = match &accepted.preset {
            Preset::None => return accepted.values.clone(),
            Preset::Triggers => self
                .capabilities_of(ty)
                .unwrap_or_default()
                .trigger_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            Preset::Provider(provider) => provider(ty),
        };
        accepted
            .values
            .iter()
            .cloned()
            .chain(computed)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Expands the accepted values declared on property `name` of `ty`.
    ///
    /// Returns `None` if the property declares no accepted values.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnregisteredProperty`] if `ty` is unregistered or
    /// declares no such property.
    pub fn accepted_values_of(
        &self,
        ty: &BehaviorType,
        name: &str,
    ) -> RegistryResult<Option<Vec<String>>> {
        let accepted = {
            let state = self.snapshot();
            let property = state
                .record_of(ty)
                .and_then(|record| record.properties.get(name))
                .ok_or_else(|| RegistryError::UnregisteredProperty {
                    behavior: ty.type_name().to_string(),
                    property: name.to_string(),
                })?;
            property.accepted().cloned()
        };
        Ok(accepted.map(|accepted| self.get_accepted_values(ty, &accepted)))
    }

    // =========================================================================
    // Descriptions
    // =========================================================================

    /// Describes `id`, or one of its properties, in the default locale.
    #[must_use]
    pub fn get_description(&self, id: &Identifier, property: Option<&str>) -> Description {
        self.get_description_in(&self.config.default_locale, id, property)
    }

    /// Describes `id`, or one of its properties, in `locale`.
    #[must_use]
    pub fn get_description_in(
        &self,
        locale: &str,
        id: &Identifier,
        property: Option<&str>,
    ) -> Description {
        self.snapshot().descriptions.resolve(locale, id, property)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns the known extensions, host included, in namespace order.
    #[must_use]
    pub fn extensions(&self) -> Vec<Extension> {
        self.snapshot()
            .namespaces
            .iter()
            .map(|(_, extension)| extension.clone())
            .collect()
    }

    /// Returns true if any extension besides the host is known.
    #[must_use]
    pub fn has_extensions(&self) -> bool {
        self.snapshot().namespaces.has_extensions()
    }

    /// Returns every binding, in identifier order.
    #[must_use]
    pub fn behaviors(&self) -> Vec<(Identifier, BehaviorType)> {
        let state = self.snapshot();
        state
            .by_id
            .keys()
            .filter_map(|id| state.record(id).ok().map(|record| (id.clone(), record.ty)))
            .collect()
    }

    /// Returns the record bound to `id`, without following overrides.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownBehavior`] if nothing is bound.
    pub fn record(&self, id: &Identifier) -> RegistryResult<Arc<BehaviorRecord>> {
        self.snapshot().record(id).cloned()
    }

    /// Returns true if `id` is bound.
    #[must_use]
    pub fn contains(&self, id: &Identifier) -> bool {
        self.snapshot().by_id.contains_key(id)
    }

    /// Returns the identifier `ty` is registered under.
    #[must_use]
    pub fn identifier_of(&self, ty: &BehaviorType) -> Option<Identifier> {
        self.snapshot()
            .record_of(ty)
            .map(|record| record.id.clone())
    }

    /// Returns the properties of `ty`.
    #[must_use]
    pub fn properties_of(&self, ty: &BehaviorType) -> Option<Arc<PropertyTable>> {
        self.snapshot()
            .record_of(ty)
            .map(|record| Arc::clone(&record.properties))
    }

    /// Returns the properties of the type bound to `id`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownBehavior`] if nothing is bound.
    pub fn properties(&self, id: &Identifier) -> RegistryResult<Arc<PropertyTable>> {
        self.snapshot()
            .record(id)
            .map(|record| Arc::clone(&record.properties))
    }

    /// Returns the metadata of `ty`.
    #[must_use]
    pub fn meta_of(&self, ty: &BehaviorType) -> Option<BehaviorMeta> {
        self.snapshot()
            .record_of(ty)
            .map(|record| record.meta.clone())
    }

    /// Returns the metadata of the type bound to `id`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownBehavior`] if nothing is bound.
    pub fn meta(&self, id: &Identifier) -> RegistryResult<BehaviorMeta> {
        self.snapshot().record(id).map(|record| record.meta.clone())
    }

    /// Returns the shapes instances of `ty` expose.
    #[must_use]
    pub fn capabilities_of(&self, ty: &BehaviorType) -> Option<CapabilitySet> {
        self.snapshot()
            .record_of(ty)
            .map(|record| record.capabilities)
    }

    /// Returns the replacement registered for `origin`.
    #[must_use]
    pub fn override_of(&self, origin: &Identifier) -> Option<Identifier> {
        self.snapshot().overrides.get(origin).cloned()
    }

    /// Returns the number of registered behaviors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().by_id.len()
    }

    /// Returns true if no behavior is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().by_id.is_empty()
    }
}

fn unregistered(record: &BehaviorRecord, property: &str) -> RegistryError {
    RegistryError::UnregisteredProperty {
        behavior: record.id.to_string(),
        property: property.to_string(),
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.snapshot();
        f.debug_struct("Registry")
            .field("host", &state.namespaces.host())
            .field("extensions", &state.namespaces.len())
            .field("behaviors", &state.by_id.len())
            .field("adapters", &state.adapters.len())
            .field("overrides", &state.overrides.len())
            .field("descriptions", &state.descriptions.len())
            .finish()
    }
}
