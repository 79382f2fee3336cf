//! Natural-language instructions sent to the image and text models.
//!
//! Everything here is pure string assembly. The wording is tunable; what must
//! hold is that each conditional block appears exactly when its input does.

pub const FACE_BLOCK_HEADER: &str = "*** YOUTUBER AVATAR (REACTION FACE) ***";
pub const ENVIRONMENT_BLOCK_HEADER: &str = "*** BACKGROUND / CONTEXT ***";
pub const GENERIC_SUBJECT_CLAUSE: &str = "No face reference was provided: create a generic but expressive character suited to the niche (e.g. a gamer wearing a headset, a tech reviewer holding a gadget).";
pub const NO_TEXT_CLAUSE: &str = "Do not add any text to the image; focus only on the visual impact.";

/// Builds the image-model prompt for a fresh thumbnail.
pub fn compose_image_prompt(
    niche: &str,
    video_title: &str,
    thumbnail_text: &str,
    details: &str,
    has_face: bool,
    has_environment: bool,
) -> String {
    let text_clause = if thumbnail_text.trim().is_empty() {
        NO_TEXT_CLAUSE.to_string()
    } else {
        format!(
            "Write the text \"{thumbnail_text}\" on the image, exactly as given. The text must be LARGE, \
             3D or neon, in a bold high-impact sans-serif font, legible and high-contrast against the \
             background, in a standout color (yellow, red or bright white)."
        )
    };

    let mut prompt = format!(
        "Create a VIRAL YOUTUBE THUMBNAIL (high CTR style).

VIDEO BRIEF:
- Niche: {niche}
- Title/Topic: {video_title}
- Extra details: {details}

REQUIRED ELEMENT (TEXT ON IMAGE):
{text_clause}

AESTHETICS:
- Style: photorealistic, 8K, high-resolution render or high-voltage studio photography.
- Composition: rule of thirds. Main subject (face or object) large and well defined. Background softly blurred (bokeh) for depth.
- Colors: high saturation, vibrant contrast, complementary palette (orange/blue, purple/green).
- Vibe: energetic, mysterious or urgent depending on the title.
"
    );

    let mut image_index = 0;
    if has_face {
        image_index += 1;
        prompt.push_str(&format!(
            "
{FACE_BLOCK_HEADER}
Image #{image_index} is the content creator.
ACTION: put this person in the thumbnail with an exaggerated, emotional facial expression (shock, extreme joy, anger, doubt) that fits the title \"{video_title}\".
LIGHTING: use a colored rim light to separate the subject from the background.
"
        ));
    }

    if has_environment {
        image_index += 1;
        prompt.push_str(&format!(
            "
{ENVIRONMENT_BLOCK_HEADER}
Image #{image_index} is the game, product or location of the video. Use it as the base for the background or main element, but raise saturation and contrast so it pops.
"
        ));
    }

    if !has_face {
        prompt.push('\n');
        prompt.push_str(GENERIC_SUBJECT_CLAUSE);
        prompt.push('\n');
    }

    prompt
}

/// Builds the text-model prompt for SEO metadata. The answer is kept as an
/// opaque caption and never parsed.
pub fn compose_metadata_prompt(video_title: &str, niche: &str) -> String {
    format!(
        "Act as a YouTube SEO specialist.
Analyze the topic \"{video_title}\" in the niche \"{niche}\".

Produce formatted text with:
1. 5 viral title variations (ethical clickbait, short, punchy).
2. Description (first 3 lines focused on the hook + a 30-second intro script).
3. 15 high-relevance tags.
4. Pattern analysis: why does this thumbnail style work for this topic?
"
    )
}

/// Wraps a free-text edit instruction with the standing edit directives.
pub fn compose_edit_prompt(instruction: &str) -> String {
    format!(
        "EDIT THIS YOUTUBE THUMBNAIL.
Instruction: {instruction}.
Keep the high saturation and keep any text legible.
Keep the YouTuber's identity if a face is provided."
    )
}
