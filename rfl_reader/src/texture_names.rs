use crate::config::TextureTranslation;

/// Renames an Alternate-revision texture reference.
pub fn translate(name: String, translation: &TextureTranslation) -> String {
	match translation {
		TextureTranslation::Disabled => name,
		TextureTranslation::Table(table) => match table.get(&name.to_ascii_lowercase()) {
			Some(translated) => translated.clone(),
			None => name,
		},
		TextureTranslation::Prefix(prefix) => insert_prefix(name, prefix),
	}
}

/// `dir/file.tga` -> `dir/{prefix}file.tga`, unless the file name already starts with it.
fn insert_prefix(name: String, prefix: &str) -> String {
	let split = name.rfind(|c| c == '/' || c == '\\').map_or(0, |i| i + 1);
	let (dir, file) = name.split_at(split);
	let has_prefix = file.get(..prefix.len()).is_some_and(|start| start.eq_ignore_ascii_case(prefix));
	match file.is_empty() || has_prefix {
		true => name,
		false => format!("{}{}{}", dir, prefix, file),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	
	#[test]
	fn table_is_case_insensitive() {
		let table = TextureTranslation::table([("Rock01.TGA", "rck_rock01.tga")]);
		assert_eq!(translate("rock01.tga".into(), &table), "rck_rock01.tga");
		assert_eq!(translate("ROCK01.tga".into(), &table), "rck_rock01.tga");
		assert_eq!(translate("grass.tga".into(), &table), "grass.tga");
	}
	
	#[test]
	fn prefix_insertion() {
		let prefix = TextureTranslation::Prefix("rf2_".into());
		assert_eq!(translate("wall.tga".into(), &prefix), "rf2_wall.tga");
		assert_eq!(translate("maps\\base\\wall.tga".into(), &prefix), "maps\\base\\rf2_wall.tga");
		assert_eq!(translate("RF2_wall.tga".into(), &prefix), "RF2_wall.tga");
		assert_eq!(translate("".into(), &prefix), "");
		assert_eq!(translate("dir/".into(), &prefix), "dir/");
	}
	
	#[test]
	fn disabled_keeps_name() {
		assert_eq!(translate("Wall.TGA".into(), &TextureTranslation::Disabled), "Wall.TGA");
	}
}
