use std::{env::args, process::ExitCode};
use rfl_reader::{
	config::{GeometrySource, TextureTranslation},
	diagnostics::{Diagnostic, Diagnostics, LogSink},
	entities::LightKind,
	DecodeConfig, Scene,
};

const USAGE: &str = "usage: rfl_tool <level.rfl> [--brushes] [--no-triangulate] [--drop-invisible] [--drop-holes] \
	[--drop-alpha] [--drop-detail] [--drop-liquid] [--drop-portal] [--drop-sky] [--intensity-scale=<f>] \
	[--texture-prefix=<p>]";

/// Logs every diagnostic and keeps a tally of anomalies.
#[derive(Default)]
struct CountingSink {
	anomalies: usize,
}

impl Diagnostics for CountingSink {
	fn emit(&mut self, diagnostic: Diagnostic) {
		self.anomalies += diagnostic.is_anomaly() as usize;
		LogSink.emit(diagnostic);
	}
}

fn parse_args() -> Result<(String, DecodeConfig), String> {
	let mut path = None;
	let mut config = DecodeConfig::default();
	for arg in args().skip(1) {
		let filter = &mut config.face_filter;
		match arg.as_str() {
			"--brushes" => config.geometry_source = GeometrySource::Brushes,
			"--no-triangulate" => config.triangulate = false,
			"--drop-invisible" => filter.drop_invisible = true,
			"--drop-holes" => filter.drop_holes = true,
			"--drop-alpha" => filter.drop_alpha = true,
			"--drop-detail" => filter.drop_detail = true,
			"--drop-liquid" => filter.drop_liquid = true,
			"--drop-portal" => filter.drop_portal = true,
			"--drop-sky" => filter.drop_sky = true,
			_ => {
				if let Some(scale) = arg.strip_prefix("--intensity-scale=") {
					config.intensity_scale = scale.parse().map_err(|e| format!("bad intensity scale '{}': {}", scale, e))?;
				} else if let Some(prefix) = arg.strip_prefix("--texture-prefix=") {
					config.texture_translation = TextureTranslation::Prefix(prefix.into());
				} else if arg.starts_with("--") || path.is_some() {
					return Err(format!("unexpected argument '{}'", arg));
				} else {
					path = Some(arg);
				}
			},
		}
	}
	path.map(|path| (path, config)).ok_or_else(|| "level path must be provided".into())
}

fn print_summary(scene: &Scene, anomalies: usize) {
	println!("{} (revision {}, {:?})", scene.level_name, scene.revision.raw(), scene.revision.family());
	if let Some(mod_name) = scene.mod_name.as_deref().filter(|name| !name.is_empty()) {
		println!("mod: {}", mod_name);
	}
	let stats = &scene.stats;
	println!(
		"sections: {} decoded, {} skipped, {} unknown, {} failed; {} anomalies",
		stats.decoded, stats.skipped, stats.unknown, stats.failed, anomalies,
	);
	let faces = scene.brushes.iter().map(|brush| brush.solid.faces.len()).sum::<usize>();
	let vertices = scene.brushes.iter().map(|brush| brush.vertices.len()).sum::<usize>();
	println!("brushes: {} ({} vertices, {} faces)", scene.brushes.len(), vertices, faces);
	if let Some(bounds) = scene.bounds() {
		println!("bounds: {} .. {} (size {})", bounds.min, bounds.max, bounds.size());
	}
	let spots = scene.lights.iter().filter(|light| light.kind() == LightKind::Spot).count();
	println!("lights: {} ({} spot), coronas: {}", scene.lights.len(), spots, scene.coronas.len());
	for (name, count) in [
		("events", scene.events.len()),
		("triggers", scene.triggers.len()),
		("items", scene.items.len()),
		("clutter", scene.clutter.len()),
		("particle emitters", scene.particle_emitters.len()),
		("push regions", scene.push_regions.len()),
		("climbing regions", scene.climbing_regions.len()),
		("decals", scene.decals.len()),
		("movers", scene.movers.len()),
		("groups", scene.groups.len()),
		("respawn points", scene.respawn_points.len()),
		("lightmaps", scene.lightmaps.len()),
	] {
		if count > 0 {
			println!("{}: {}", name, count);
		}
	}
	if let Some(properties) = &scene.level_properties {
		println!("lightmap multiplier: {}, fog {}..{}", properties.lightmap_multiplier, properties.fog_near, properties.fog_far);
	}
}

fn main() -> ExitCode {
	env_logger::init();
	let (path, config) = match parse_args() {
		Ok(parsed) => parsed,
		Err(e) => {
			eprintln!("{}\n{}", e, USAGE);
			return ExitCode::FAILURE;
		},
	};
	let bytes = match std::fs::read(&path) {
		Ok(bytes) => bytes,
		Err(e) => {
			log::error!("{}: {}", path, e);
			return ExitCode::FAILURE;
		},
	};
	let mut sink = CountingSink::default();
	match rfl_reader::decode_with(&bytes, &config, &mut sink) {
		Ok(scene) => {
			print_summary(&scene, sink.anomalies);
			ExitCode::SUCCESS
		},
		Err(e) => {
			log::error!("{}: {}", path, e);
			ExitCode::FAILURE
		},
	}
}
