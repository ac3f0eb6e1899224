//! Scene-wide fixups for Alternate levels, run once after the section loop.

use itertools::Itertools;
use crate::{
	container::Context,
	diagnostics::Diagnostic,
	entities::{Corona, Light, LightKind, ObjectHeader},
	scene::Scene,
};

/// Base range when the level has no lights of its own.
pub const FALLBACK_BASE_RANGE: f32 = 10.0;
/// Degrees. Narrower coronas become spot lights.
pub const SPOT_CONE_THRESHOLD: f32 = 60.0;
const MIN_CORONA_INTENSITY: f32 = 0.01;
const MIN_FORWARD_LENGTH: f32 = 1e-4;

fn median(values: impl IntoIterator<Item = f32>) -> Option<f32> {
	let sorted = values.into_iter().sorted_by(f32::total_cmp).collect::<Vec<_>>();
	let mid = sorted.len() / 2;
	match sorted.len() {
		0 => None,
		len if len % 2 == 0 => Some((sorted[mid - 1] + sorted[mid]) / 2.0),
		_ => Some(sorted[mid]),
	}
}

/// Half the median range of the decoded lights.
pub fn base_range(lights: &[Light]) -> f32 {
	median(lights.iter().map(|light| light.range)).map_or(FALLBACK_BASE_RANGE, |median| median / 2.0)
}

fn corona_light(corona: &Corona, uid: u32, base_range: f32, intensity_scale: f32) -> Light {
	let intensity = corona.intensity.max(MIN_CORONA_INTENSITY);
	let header = &corona.object;
	let object = ObjectHeader::new(uid, "Light", header.pos, header.rotation);
	let is_spot = corona.cone_angle < SPOT_CONE_THRESHOLD
		&& header.forward().length() >= MIN_FORWARD_LENGTH;
	let kind = match is_spot {
		true => LightKind::Spot,
		false => LightKind::Point,
	};
	let mut light = Light::new(object, kind, corona.color, base_range * intensity.sqrt(), intensity * intensity_scale);
	if is_spot {
		light.fov = corona.cone_angle / 2.0;
	}
	light
}

fn derive_corona_lights(scene: &mut Scene, ctx: &mut Context) {
	let base_range = base_range(&scene.lights);
	let mut next_uid = scene.max_uid().map_or(Some(0), |uid| uid.checked_add(1));
	let mut converted = 0;
	let mut black = 0;
	for corona in &scene.coronas {
		if corona.color.is_black() {
			black += 1;
			ctx.emit(Diagnostic::BlackCoronaSkipped { uid: corona.object.uid });
			continue;
		}
		let Some(uid) = next_uid else {
			log::warn!("uid space exhausted, remaining coronas not converted");
			break;
		};
		scene.lights.push(corona_light(corona, uid, base_range, ctx.config.intensity_scale));
		next_uid = uid.checked_add(1);
		converted += 1;
	}
	log::debug!(
		"{} coronas converted to lights (base range {}), {} black skipped",
		converted, base_range, black,
	);
}

fn apply_lightmap_multiplier(scene: &mut Scene) {
	let multiplier = scene.lightmap_multiplier();
	for light in &mut scene.lights {
		light.on_intensity *= multiplier;
		light.off_intensity *= multiplier;
	}
}

pub(crate) fn run(scene: &mut Scene, ctx: &mut Context) {
	derive_corona_lights(scene, ctx);
	apply_lightmap_multiplier(scene);
}
