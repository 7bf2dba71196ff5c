//! `climate-controls`: setpoint steppers plus fan and hvac mode buttons.

use cardhub_domain::climate::{
    FAN_MODES, HVAC_MODES, ModeCycle, SetpointMirror, SetpointTarget, fan_mode_icon,
    fraction_digits, hvac_mode_icon, resolve_step,
};
use cardhub_domain::entity::Entity;
use cardhub_domain::error::ConfigError;
use cardhub_domain::feature::ClimateControlsConfig;
use cardhub_domain::feature_flags::ClimateEntityFeature;
use cardhub_domain::id::FeatureId;
use cardhub_domain::service::ServiceCall;
use cardhub_domain::surface::{Control, ControlSurface, ModeButton, ModeKind, NumberStepper};

use super::support::supports_climate_controls;
use super::{CardFeature, FeatureContext};
use crate::ports::ServiceCaller;

const DOMAIN: &str = "climate";

/// Setpoint and mode controls for a climate entity.
///
/// Setpoint edits land in a local mirror straight away and reach the hub
/// after the dispatcher's quiet period. Mode taps are sent at once.
pub struct ClimateControlsFeature<C> {
    id: FeatureId,
    ctx: FeatureContext<C>,
    config: Option<ClimateControlsConfig>,
    entity: Option<Entity>,
    setpoints: SetpointMirror,
    fan: ModeCycle,
    hvac: ModeCycle,
}

impl<C> ClimateControlsFeature<C> {
    pub fn new(ctx: FeatureContext<C>) -> Self {
        Self {
            id: FeatureId::new(),
            ctx,
            config: None,
            entity: None,
            setpoints: SetpointMirror::default(),
            fan: ModeCycle::new(FAN_MODES),
            hvac: ModeCycle::new(HVAC_MODES),
        }
    }

    /// Apply a configuration, rebuilding the hvac mode list from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `config` is `None`.
    pub fn set_config(&mut self, config: Option<ClimateControlsConfig>) -> Result<(), ConfigError> {
        let config = config.ok_or(ConfigError::Missing)?;
        self.hvac = ModeCycle::new(config.mode_list());
        if let Some(entity) = &self.entity {
            self.hvac.sync(Some(entity.state.as_str()));
        }
        self.config = Some(config);
        Ok(())
    }

    #[must_use]
    pub fn setpoints(&self) -> SetpointMirror {
        self.setpoints
    }

    #[must_use]
    pub fn fan_mode(&self) -> &str {
        self.fan.current()
    }

    #[must_use]
    pub fn hvac_mode(&self) -> &str {
        self.hvac.current()
    }

    fn sync(&mut self, entity: &Entity) {
        self.setpoints = SetpointMirror::from_entity(entity);
        self.fan.sync(entity.attribute_str("fan_mode"));
        self.hvac.sync(Some(entity.state.as_str()));
    }

    fn fan_button(&self) -> Control {
        Control::ModeButton(ModeButton {
            kind: ModeKind::Fan,
            mode: self.fan.current().to_string(),
            icon: fan_mode_icon(self.fan.current()),
        })
    }

    fn hvac_button(&self) -> Control {
        Control::ModeButton(ModeButton {
            kind: ModeKind::Hvac,
            mode: self.hvac.current().to_string(),
            icon: hvac_mode_icon(self.hvac.current()),
        })
    }

    /// The `set_temperature` call for the mirrored value(s) behind `target`.
    ///
    /// Range targets always carry both bounds.
    fn setpoint_call(&self, entity: &Entity, target: SetpointTarget) -> Option<ServiceCall> {
        let call = ServiceCall::new(DOMAIN, "set_temperature", &entity.entity_id);
        if target.is_range() {
            let (Some(low), Some(high)) = (self.setpoints.low, self.setpoints.high) else {
                return None;
            };
            let call = call.with("target_temp_low", low);
            return Some(call.with("target_temp_high", high));
        }
        self.setpoints
            .value
            .map(|value| call.with("temperature", value))
    }
}

impl<C> ClimateControlsFeature<C>
where
    C: ServiceCaller + 'static,
{
    /// A stepper moved `target` to `value`.
    ///
    /// `NaN` and infinities are discarded: the mirror stays as it was and
    /// nothing is sent.
    pub fn value_changed(&mut self, target: SetpointTarget, value: f64) {
        if !value.is_finite() {
            tracing::debug!(feature = %self.id, ?target, "discarding non-numeric setpoint");
            return;
        }
        let Some(entity) = &self.entity else {
            return;
        };
        self.setpoints.set(target, value);
        if let Some(call) = self.setpoint_call(entity, target) {
            self.ctx.dispatcher.send_debounced(self.id, call);
        }
    }

    /// A setpoint typed as text; anything that is not a number is discarded.
    pub fn value_entered(&mut self, target: SetpointTarget, raw: &str) {
        let value = raw.trim().parse().unwrap_or(f64::NAN);
        self.value_changed(target, value);
    }

    /// Advance to the next fan mode and send it.
    pub fn fan_tap(&mut self) {
        let Some(entity) = &self.entity else {
            return;
        };
        let call = ServiceCall::new(DOMAIN, "set_fan_mode", &entity.entity_id);
        let mode = self.fan.advance();
        self.ctx.dispatcher.send(call.with("fan_mode", mode));
    }

    /// Advance to the next hvac mode and send it.
    pub fn hvac_tap(&mut self) {
        let Some(entity) = &self.entity else {
            return;
        };
        let call = ServiceCall::new(DOMAIN, "set_hvac_mode", &entity.entity_id);
        let mode = self.hvac.advance();
        self.ctx.dispatcher.send(call.with("hvac_mode", mode));
    }
}

impl<C> CardFeature for ClimateControlsFeature<C> {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn set_entity(&mut self, entity: Option<Entity>) {
        let rebound = match (&self.entity, &entity) {
            (Some(old), Some(new)) => old.entity_id != new.entity_id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if rebound && self.ctx.dispatcher.cancel(self.id) {
            tracing::debug!(feature = %self.id, "dropped pending setpoint after rebind");
        }
        if let Some(entity) = &entity {
            self.sync(entity);
        }
        self.entity = entity;
    }

    fn render(&self) -> Option<ControlSurface> {
        let config = self.config.as_ref()?;
        let entity = self.entity.as_ref()?;
        if !supports_climate_controls(entity) {
            return None;
        }

        let unit = self.ctx.units.temperature;
        let step = resolve_step(entity, unit);
        let precision = fraction_digits(step);
        let available = entity.state.is_available();
        let min = entity.attribute_f64("min_temp");
        let max = entity.attribute_f64("max_temp");
        let stepper = |target: SetpointTarget, value: f64, min: Option<f64>, max: Option<f64>| {
            Control::NumberStepper(NumberStepper {
                target: Some(target),
                value: Some(value),
                min,
                max,
                step: Some(step),
                precision,
                unit: Some(unit.symbol()),
                label: Some(target.attribute()),
                disabled: !available,
            })
        };

        if let (true, Some(value), true) = (
            entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE),
            self.setpoints.value,
            available,
        ) {
            let mut controls = Vec::with_capacity(3);
            if config.show_hvac_modes {
                controls.push(self.hvac_button());
            }
            controls.push(stepper(SetpointTarget::Value, value, min, max));
            controls.push(self.fan_button());
            return Some(ControlSurface::new(controls));
        }

        if let (true, Some(low), Some(high), true) = (
            entity.supports_feature(ClimateEntityFeature::TARGET_TEMPERATURE_RANGE),
            self.setpoints.low,
            self.setpoints.high,
            available,
        ) {
            let low_max = max.map_or(high, |max| max.min(high));
            let high_min = min.map_or(low, |min| min.max(low));
            let controls = vec![
                stepper(SetpointTarget::Low, low, min, Some(low_max)),
                stepper(SetpointTarget::High, high, Some(high_min), max),
            ];
            return Some(ControlSurface::new(controls));
        }

        let placeholder = NumberStepper {
            unit: Some(unit.symbol()),
            label: Some(SetpointTarget::Value.attribute()),
            disabled: true,
            ..NumberStepper::default()
        };
        Some(ControlSurface::new(vec![Control::NumberStepper(placeholder)]))
    }

    fn teardown(&mut self) {
        self.ctx.dispatcher.cancel(self.id);
        self.entity = None;
    }
}

impl<C> Drop for ClimateControlsFeature<C> {
    fn drop(&mut self) {
        self.ctx.dispatcher.cancel(self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::debounce::DEFAULT_DELAY;
    use crate::dispatch::CommandDispatcher;
    use crate::dispatch::testing::{RecordingCaller, settle};
    use cardhub_domain::feature_flags::SUPPORTED_FEATURES;
    use cardhub_domain::unit::{TemperatureUnit, UnitSystem};

    const SINGLE: u32 = ClimateEntityFeature::TARGET_TEMPERATURE | ClimateEntityFeature::FAN_MODE;
    const RANGE: u32 = ClimateEntityFeature::TARGET_TEMPERATURE_RANGE;

    fn context(
        caller: &Arc<RecordingCaller>,
        unit: TemperatureUnit,
    ) -> FeatureContext<RecordingCaller> {
        let dispatcher = CommandDispatcher::new(Arc::clone(caller), DEFAULT_DELAY);
        FeatureContext::new(Arc::new(dispatcher), UnitSystem { temperature: unit })
    }

    fn feature(
        caller: &Arc<RecordingCaller>,
        config: ClimateControlsConfig,
    ) -> ClimateControlsFeature<RecordingCaller> {
        let mut feature = ClimateControlsFeature::new(context(caller, TemperatureUnit::Celsius));
        feature.set_config(Some(config)).unwrap();
        feature
    }

    fn thermostat(state: &str, features: u32, attrs: &[(&str, f64)]) -> Entity {
        let mut builder = Entity::builder()
            .entity_id("climate.office")
            .state(state)
            .attribute(SUPPORTED_FEATURES, features);
        for (key, value) in attrs {
            builder = builder.attribute(*key, *value);
        }
        builder.build().unwrap()
    }

    fn range(low: f64, high: f64) -> Entity {
        thermostat(
            "heat_cool",
            RANGE,
            &[
                ("target_temp_low", low),
                ("target_temp_high", high),
                ("min_temp", 7.0),
                ("max_temp", 35.0),
            ],
        )
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_single_setpoint_once_after_quiet_period() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        let entity = Entity::builder()
            .entity_id("climate.office")
            .state("heat")
            .attribute(SUPPORTED_FEATURES, SINGLE)
            .attribute("temperature", 20_i64)
            .attribute("target_temp_step", 1_i64)
            .build()
            .unwrap();
        feature.set_entity(Some(entity));

        let surface = feature.render().unwrap();
        let stepper = surface.stepper(SetpointTarget::Value).unwrap();
        assert_eq!(stepper.value, Some(20.0));
        assert_eq!(stepper.step, Some(1.0));
        assert_eq!(stepper.precision, 0);
        assert_eq!(surface.steppers().count(), 1);

        feature.value_changed(SetpointTarget::Value, 22.0);
        settle(999).await;
        assert!(caller.calls().is_empty());
        settle(100).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].service, "set_temperature");
        assert_eq!(
            calls[0].data,
            json!({"entity_id": "climate.office", "temperature": 22.0})
        );
    }

    #[test]
    fn should_render_bounds_and_precision_from_snapshot() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat(
            "heat",
            SINGLE,
            &[
                ("temperature", 21.5),
                ("min_temp", 7.0),
                ("max_temp", 35.0),
                ("target_temp_step", 0.5),
            ],
        )));

        let surface = feature.render().unwrap();
        let stepper = surface.stepper(SetpointTarget::Value).unwrap();
        assert_eq!((stepper.min, stepper.max), (Some(7.0), Some(35.0)));
        assert_eq!(stepper.step, Some(0.5));
        assert_eq!(stepper.precision, 1);
        assert_eq!(stepper.unit, Some("°C"));
        assert_eq!(stepper.label, Some("temperature"));
    }

    #[test]
    fn should_fall_back_to_whole_degree_step_in_fahrenheit() {
        let caller = Arc::new(RecordingCaller::default());
        let ctx = context(&caller, TemperatureUnit::Fahrenheit);
        let mut feature = ClimateControlsFeature::new(ctx);
        feature
            .set_config(Some(ClimateControlsConfig::default()))
            .unwrap();
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 70.0)])));

        let surface = feature.render().unwrap();
        let stepper = surface.stepper(SetpointTarget::Value).unwrap();
        assert_eq!(stepper.step, Some(1.0));
        assert_eq!(stepper.precision, 0);
    }

    #[test]
    fn should_order_hvac_button_before_stepper_and_fan_button() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(
            &caller,
            ClimateControlsConfig {
                show_hvac_modes: true,
                hvac_modes: None,
            },
        );
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        let surface = feature.render().unwrap();
        assert!(matches!(
            surface.controls[0],
            Control::ModeButton(ref b) if b.kind == ModeKind::Hvac && b.mode == "heat"
        ));
        assert!(matches!(surface.controls[1], Control::NumberStepper(_)));
        assert!(matches!(
            surface.controls[2],
            Control::ModeButton(ref b) if b.kind == ModeKind::Fan
        ));
    }

    #[test]
    fn should_hide_hvac_button_by_default() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        let surface = feature.render().unwrap();
        assert!(surface.mode_button(ModeKind::Hvac).is_none());
        assert_eq!(surface.mode_button(ModeKind::Fan).unwrap().mode, "auto");
    }

    #[tokio::test(start_paused = true)]
    async fn should_land_on_k_mod_len_after_k_hvac_taps() {
        for taps in 1..=12 {
            let caller = Arc::new(RecordingCaller::default());
            let mut feature = feature(&caller, ClimateControlsConfig::default());
            feature.set_entity(Some(thermostat("off", SINGLE, &[("temperature", 21.0)])));

            for _ in 0..taps {
                feature.hvac_tap();
            }
            settle(1).await;

            let expected = HVAC_MODES[taps % HVAC_MODES.len()];
            assert_eq!(feature.hvac_mode(), expected);
            let calls = caller.calls();
            assert_eq!(calls.len(), taps);
            assert_eq!(calls[taps - 1].service, "set_hvac_mode");
            assert_eq!(calls[taps - 1].get("hvac_mode"), Some(&json!(expected)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_cycle_configured_hvac_modes_only() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(
            &caller,
            ClimateControlsConfig {
                show_hvac_modes: true,
                hvac_modes: Some(vec!["heat".to_string(), "off".to_string()]),
            },
        );
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.hvac_tap();
        feature.hvac_tap();
        settle(1).await;

        let modes: Vec<_> = caller
            .calls()
            .iter()
            .map(|c| c.get("hvac_mode").cloned())
            .collect();
        assert_eq!(modes, vec![Some(json!("off")), Some(json!("heat"))]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_cycle_every_hvac_mode_when_configured_list_is_empty() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(
            &caller,
            ClimateControlsConfig {
                show_hvac_modes: true,
                hvac_modes: Some(Vec::new()),
            },
        );
        feature.set_entity(Some(thermostat("off", SINGLE, &[("temperature", 21.0)])));
        assert_eq!(feature.hvac_mode(), "off");

        for _ in 0..HVAC_MODES.len() {
            feature.hvac_tap();
        }
        settle(1).await;

        let modes: Vec<_> = caller
            .calls()
            .iter()
            .filter_map(|c| c.get("hvac_mode").cloned())
            .collect();
        assert_eq!(
            modes,
            vec![
                json!("fan_only"),
                json!("heat_cool"),
                json!("heat"),
                json!("cool"),
                json!("off"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_fan_mode_immediately() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        let entity = Entity::builder()
            .entity_id("climate.office")
            .state("cool")
            .attribute(SUPPORTED_FEATURES, SINGLE)
            .attribute("temperature", 24.0)
            .attribute("fan_mode", "medium")
            .build()
            .unwrap();
        feature.set_entity(Some(entity));

        feature.fan_tap();
        settle(1).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].data,
            json!({"entity_id": "climate.office", "fan_mode": "high"})
        );
    }

    #[test]
    fn should_start_fan_cycle_at_auto_for_unknown_mode() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        let entity = Entity::builder()
            .entity_id("climate.office")
            .state("eco")
            .attribute(SUPPORTED_FEATURES, SINGLE)
            .attribute("temperature", 21.0)
            .attribute("fan_mode", "turbo")
            .build()
            .unwrap();
        feature.set_entity(Some(entity));

        assert_eq!(feature.fan_mode(), "auto");
        assert_eq!(feature.hvac_mode(), "off");
    }

    #[test]
    fn should_never_cross_range_bounds() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        let bounds = [
            (7.0, 35.0),
            (18.0, 24.0),
            (21.0, 21.0),
            (10.0, 40.0),
            (5.0, 12.5),
        ];
        for (low, high) in bounds {
            feature.set_entity(Some(range(low, high)));
            let surface = feature.render().unwrap();
            let low_stepper = surface.stepper(SetpointTarget::Low).unwrap();
            let high_stepper = surface.stepper(SetpointTarget::High).unwrap();

            assert!(low_stepper.max.unwrap() <= high, "{low}..{high}");
            assert!(high_stepper.min.unwrap() >= low, "{low}..{high}");
            assert_eq!(low_stepper.max, Some(high.min(35.0)));
            assert_eq!(high_stepper.min, Some(low.max(7.0)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_send_both_bounds_once_for_burst_of_range_edits() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(range(18.0, 24.0)));

        feature.value_changed(SetpointTarget::Low, 19.0);
        settle(200).await;
        feature.value_changed(SetpointTarget::High, 25.0);
        settle(1_100).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].data,
            json!({
                "entity_id": "climate.office",
                "target_temp_low": 19.0,
                "target_temp_high": 25.0
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_discard_non_numeric_input() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.value_entered(SetpointTarget::Value, "warm");
        feature.value_changed(SetpointTarget::Value, f64::NAN);
        settle(2_000).await;

        assert_eq!(feature.setpoints().value, Some(21.0));
        assert!(caller.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_discard_infinite_input() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.value_entered(SetpointTarget::Value, "inf");
        feature.value_entered(SetpointTarget::Value, "-infinity");
        feature.value_changed(SetpointTarget::Value, f64::INFINITY);
        settle(2_000).await;

        assert_eq!(feature.setpoints().value, Some(21.0));
        assert!(caller.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_parse_entered_value() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.value_entered(SetpointTarget::Value, " 23.5 ");
        assert_eq!(feature.setpoints().value, Some(23.5));
        let surface = feature.render().unwrap();
        assert_eq!(
            surface.stepper(SetpointTarget::Value).unwrap().value,
            Some(23.5)
        );
        settle(1_100).await;

        assert_eq!(caller.calls().len(), 1);
    }

    #[test]
    fn should_render_disabled_placeholder_when_unavailable() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("unavailable", SINGLE, &[("temperature", 21.0)])));

        let surface = feature.render().unwrap();
        let stepper = surface.steppers().next().unwrap();
        assert!(stepper.disabled);
        assert_eq!(stepper.value, None);
        assert_eq!(stepper.target, None);
        assert_eq!(surface.controls.len(), 1);
    }

    #[test]
    fn should_render_placeholder_when_setpoint_is_missing() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[])));

        let surface = feature.render().unwrap();
        assert_eq!(surface.steppers().next().unwrap().value, None);
    }

    #[test]
    fn should_render_nothing_for_unsupported_entity() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        let fan_only = thermostat(
            "heat",
            ClimateEntityFeature::FAN_MODE,
            &[("temperature", 21.0)],
        );
        feature.set_entity(Some(fan_only));
        assert!(feature.render().is_none());

        feature.set_entity(None);
        assert!(feature.render().is_none());
    }

    #[test]
    fn should_reject_missing_configuration() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = ClimateControlsFeature::new(context(&caller, TemperatureUnit::Celsius));
        assert_eq!(feature.set_config(None), Err(ConfigError::Missing));

        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));
        assert!(feature.render().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_pending_edit_when_same_entity_refreshes() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.value_changed(SetpointTarget::Value, 22.0);
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));
        assert_eq!(feature.setpoints().value, Some(21.0));
        settle(1_100).await;

        let calls = caller.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get("temperature"), Some(&json!(22.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_pending_edit_when_rebound_to_other_entity() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());
        feature.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));

        feature.value_changed(SetpointTarget::Value, 22.0);
        let other = Entity::builder()
            .entity_id("climate.bedroom")
            .state("heat")
            .attribute(SUPPORTED_FEATURES, SINGLE)
            .attribute("temperature", 19.0)
            .build()
            .unwrap();
        feature.set_entity(Some(other));
        settle(2_000).await;

        assert!(caller.calls().is_empty());
        assert_eq!(feature.setpoints().value, Some(19.0));
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_pending_edit_on_teardown_and_drop() {
        let caller = Arc::new(RecordingCaller::default());
        let mut torn_down = feature(&caller, ClimateControlsConfig::default());
        torn_down.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));
        torn_down.value_changed(SetpointTarget::Value, 22.0);
        torn_down.teardown();

        {
            let mut dropped = feature(&caller, ClimateControlsConfig::default());
            dropped.set_entity(Some(thermostat("heat", SINGLE, &[("temperature", 21.0)])));
            dropped.value_changed(SetpointTarget::Value, 23.0);
        }
        settle(2_000).await;

        assert!(caller.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_input_without_entity() {
        let caller = Arc::new(RecordingCaller::default());
        let mut feature = feature(&caller, ClimateControlsConfig::default());

        feature.value_changed(SetpointTarget::Value, 22.0);
        feature.fan_tap();
        feature.hvac_tap();
        settle(2_000).await;

        assert!(caller.calls().is_empty());
    }
}
