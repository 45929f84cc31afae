//! Prompt enrichment per subcommand.
//!
//! Each builder turns the user's prompt plus command options into the final
//! text sent to Gemini; clauses are joined with `". "`.

fn join(parts: Vec<String>) -> String {
    parts.join(". ")
}

pub fn generate(prompt: &str, style: Option<&str>, variations: &[String]) -> String {
    let mut parts = vec![prompt.to_string()];
    if let Some(style) = style.filter(|s| !s.is_empty()) {
        parts.push(format!("Style: {}", style));
    }
    parts.extend(variations.iter().map(|v| format!("Vary the {}", v)));
    join(parts)
}

pub fn edit(prompt: &str) -> String {
    format!("Edit this image: {}", prompt)
}

pub fn restore(prompt: Option<&str>) -> String {
    match prompt.filter(|p| !p.is_empty()) {
        Some(prompt) => format!("Restore and enhance this image: {}", prompt),
        None => "Restore and enhance this image. Improve quality, fix artifacts, and sharpen details."
            .to_string(),
    }
}

pub struct IconOptions<'a> {
    pub style: &'a str,
    pub size: u32,
    pub background: &'a str,
    pub corners: &'a str,
}

pub fn icon(prompt: &str, opts: &IconOptions<'_>) -> String {
    join(vec![
        format!("Generate an app icon: {}", prompt),
        format!("Style: {}", opts.style),
        format!("Size: {}x{} pixels", opts.size, opts.size),
        format!("Background: {}", opts.background),
        if opts.corners == "rounded" {
            "Rounded corners suitable for app icons".to_string()
        } else {
            "Sharp corners".to_string()
        },
        "Clean, centered design suitable for use as an application icon".to_string(),
    ])
}

pub struct PatternOptions<'a> {
    pub style: &'a str,
    pub colors: &'a str,
    pub density: &'a str,
    pub tile_size: &'a str,
    pub repeat: &'a str,
}

pub fn pattern(prompt: &str, opts: &PatternOptions<'_>) -> String {
    join(vec![
        format!("Generate a seamless {} pattern: {}", opts.style, prompt),
        format!("Color scheme: {}", opts.colors),
        format!("Element density: {}", opts.density),
        format!("Tile size: {}", opts.tile_size),
        if opts.repeat == "mirror" {
            "Use mirror tiling for seamless repetition".to_string()
        } else {
            "Design for seamless tile repetition".to_string()
        },
    ])
}

/// Prompt for frame `step` (1-based) of a `total`-frame story.
pub fn story_frame(prompt: &str, step: u32, total: u32, style: &str, transition: &str) -> String {
    let mut parts = vec![format!(
        "Generate frame {} of {} for a visual story: {}",
        step, total, prompt
    )];

    parts.push(if style == "consistent" {
        "Maintain consistent visual style, characters, and setting across all frames".to_string()
    } else {
        "Allow the visual style to evolve naturally across frames".to_string()
    });

    parts.push(
        match transition {
            "dramatic" => "Use dramatic transitions between scenes",
            "fade" => "Use subtle, fading transitions between scenes",
            _ => "Use smooth, natural transitions between scenes",
        }
        .to_string(),
    );

    parts.push(if step == 1 {
        "This is the opening scene: establish the setting and characters".to_string()
    } else if step == total {
        "This is the final scene: bring the story to a conclusion".to_string()
    } else {
        format!("This is scene {}: continue developing the narrative", step)
    });

    join(parts)
}

pub struct DiagramOptions<'a> {
    pub kind: &'a str,
    pub style: &'a str,
    pub layout: &'a str,
    pub complexity: &'a str,
    pub colors: &'a str,
}

pub fn diagram(prompt: &str, opts: &DiagramOptions<'_>) -> String {
    join(vec![
        format!("Generate a {} diagram: {}", opts.kind, prompt),
        format!("Visual style: {}", opts.style),
        format!("Layout: {}", opts.layout),
        format!("Level of detail: {}", opts.complexity),
        format!("Color scheme: {}", opts.colors),
        "Include clear labels and annotations".to_string(),
        "Professional quality suitable for documentation or presentations".to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_without_options_is_the_prompt() {
        assert_eq!(generate("a cat", None, &[]), "a cat");
        assert_eq!(generate("a cat", Some(""), &[]), "a cat");
    }

    #[test]
    fn test_generate_with_style_and_variations() {
        let variations = vec!["lighting".to_string(), "mood".to_string()];
        assert_eq!(
            generate("a cat", Some("watercolor"), &variations),
            "a cat. Style: watercolor. Vary the lighting. Vary the mood"
        );
    }

    #[test]
    fn test_restore_default_prompt() {
        assert!(restore(None).starts_with("Restore and enhance this image. Improve quality"));
        assert_eq!(
            restore(Some("remove scratches")),
            "Restore and enhance this image: remove scratches"
        );
    }

    #[test]
    fn test_icon_mentions_size_and_corners() {
        let text = icon(
            "a rocket",
            &IconOptions {
                style: "flat",
                size: 128,
                background: "transparent",
                corners: "sharp",
            },
        );
        assert!(text.starts_with("Generate an app icon: a rocket. Style: flat"));
        assert!(text.contains("Size: 128x128 pixels"));
        assert!(text.contains("Background: transparent"));
        assert!(text.contains("Sharp corners"));
    }

    #[test]
    fn test_story_frame_positions() {
        let first = story_frame("a hero", 1, 3, "consistent", "smooth");
        assert!(first.starts_with("Generate frame 1 of 3 for a visual story: a hero"));
        assert!(first.contains("opening scene"));
        assert!(first.contains("Maintain consistent visual style"));

        let middle = story_frame("a hero", 2, 3, "evolving", "fade");
        assert!(middle.contains("This is scene 2"));
        assert!(middle.contains("evolve naturally"));
        assert!(middle.contains("fading transitions"));

        let last = story_frame("a hero", 3, 3, "consistent", "dramatic");
        assert!(last.contains("final scene"));
        assert!(last.contains("dramatic transitions"));
    }

    #[test]
    fn test_pattern_and_diagram_clauses() {
        let p = pattern(
            "leaves",
            &PatternOptions {
                style: "organic",
                colors: "duotone",
                density: "dense",
                tile_size: "512x512",
                repeat: "mirror",
            },
        );
        assert!(p.starts_with("Generate a seamless organic pattern: leaves"));
        assert!(p.ends_with("Use mirror tiling for seamless repetition"));

        let d = diagram(
            "login flow",
            &DiagramOptions {
                kind: "sequence",
                style: "clean",
                layout: "vertical",
                complexity: "simple",
                colors: "mono",
            },
        );
        assert!(d.starts_with("Generate a sequence diagram: login flow. Visual style: clean"));
        assert!(d.contains("Level of detail: simple"));
    }
}
