//! Prompt template builder: compiles a validated request into the single
//! instruction string sent to the model. Pure string assembly, no I/O.

use crate::options::{ContentType, Genre, Length, Mood};
use crate::request::GenerationRequest;

/// Assemble the full instruction prompt: role preamble, the user's own
/// instructions, a type-specific format guide, a length structure guide, and
/// the global formatting rules the display layer depends on.
pub fn compose(req: &GenerationRequest) -> String {
    format!(
        "You are a creative writing assistant. Please generate a {length} {kind} \
         in the {genre} genre with a {mood} mood.\n\n\
         The writing should be original, engaging, and reflect the specified \
         genre and mood accurately.\n\n\
         Additional instructions from the user: {text}\n\n\
         {type_guide}\n\n{length_guide}\n\n{rules}",
        length = req.length,
        kind = req.content_type,
        genre = req.genre,
        mood = req.mood,
        text = req.text.trim(),
        type_guide = format_guide(Some(req.content_type), req.mood, req.genre),
        length_guide = structure_guide(Some(req.length)),
        rules = FORMATTING_RULES,
    )
}

/// Per-type formatting guide with the mood and genre labels substituted in.
/// `None` (a label the closed set did not resolve) gets the generic guide.
pub fn format_guide(content_type: Option<ContentType>, mood: Mood, genre: Genre) -> String {
    let Some(content_type) = content_type else {
        return default_format_guide(mood, genre);
    };
    match content_type {
        ContentType::ShortStory => format!(
            "Format your response as a short story with a clear beginning, middle, and end.\n\
             Use proper paragraph breaks with blank lines between paragraphs.\n\
             Include character development, setting descriptions, and a plot that reflects the {genre} genre.\n\
             Maintain a {mood} mood throughout the narrative.\n\
             Format dialogue properly with quotation marks and paragraph breaks for new speakers.\n\
             Use emphasis (italics) for internal thoughts by placing _underscores_ around them.\n\
             Create vivid imagery and sensory details.\n\
             Vary sentence length and structure for rhythm and pacing.\n\
             Do not include a title unless specifically requested."
        ),
        ContentType::Poetry => format!(
            "Format your response as a poem with clear stanza breaks (double line breaks between stanzas).\n\
             Use proper line breaks for each line of poetry (single line breaks).\n\
             Employ poetic devices like metaphor, simile, and imagery that reflect the {mood} mood.\n\
             Consider using a structure appropriate for the {genre} genre.\n\
             Use emphasis (italics) for important words or phrases by placing _underscores_ around them.\n\
             Make sure the poem has a clear theme and emotional impact.\n\
             Separate stanzas with blank lines.\n\
             Do not include a title unless specifically requested."
        ),
        ContentType::Essay => format!(
            "Write an essay with a clear thesis, supporting arguments, and conclusion.\n\
             Organize the content into well-defined paragraphs with topic sentences.\n\
             Use proper paragraph breaks with blank lines between paragraphs.\n\
             Maintain a {mood} tone throughout the essay.\n\
             Focus on a subject appropriate for the {genre} genre.\n\
             Use emphasis (italics) for key terms or concepts by placing _underscores_ around them.\n\
             Include transitions between paragraphs for smooth flow.\n\
             Use formal or informal language as appropriate for the genre and mood."
        ),
        ContentType::FlashFiction => format!(
            "Create a complete story in an extremely condensed form.\n\
             Use proper paragraph breaks with blank lines between paragraphs.\n\
             Include a hook, conflict, and resolution despite the brevity.\n\
             Every word should serve the story's purpose.\n\
             Use emphasis (italics) for important moments by placing _underscores_ around them.\n\
             Maintain a {mood} mood throughout.\n\
             Ensure the story fits the {genre} genre conventions.\n\
             Create vivid imagery with minimal words.\n\
             End with impact - the last line should resonate."
        ),
        ContentType::DialogueScene => format!(
            "Create a dialogue scene between characters that reflects the {genre} genre.\n\
             Format the dialogue properly with a new paragraph for each speaker.\n\
             Use proper dialogue formatting with quotation marks.\n\
             Include character names before or after dialogue when needed for clarity.\n\
             Include minimal narrative description between dialogue lines.\n\
             Format:\n\
             Character name: \"Dialogue text here.\"\n\n\
             Other character: \"Response dialogue here.\"\n\n\
             Maintain a {mood} mood throughout the conversation.\n\
             Use emphasis (italics) for emphasized words by placing _underscores_ around them.\n\
             Make the dialogue reveal character personalities and advance a mini-plot."
        ),
        ContentType::Quotes => format!(
            "Generate a set of meaningful quotes that reflect the {mood} mood and {genre} theme.\n\
             Each quote should be impactful and standalone.\n\
             Format each quote on a new line with a dash or attribution.\n\
             Separate quotes with blank lines for clarity.\n\
             Format:\n\
             \"Quote text here.\" - Attribution (if applicable)\n\n\
             \"Another quote text here.\" - Attribution (if applicable)\n\n\
             Make the quotes profound and thought-provoking.\n\
             Use emphasis (italics) for key words by placing _underscores_ around them.\n\
             Aim for 3-7 quotes depending on the requested length."
        ),
        ContentType::Affirmations => format!(
            "Generate positive affirmations that reflect the {mood} mood.\n\
             Each affirmation should be on a new line and begin with \"I\" statements.\n\
             Separate each affirmation with a blank line for clarity.\n\
             Make the affirmations empowering and aligned with the {genre} theme.\n\
             Use emphasis (italics) for key words by placing _underscores_ around them.\n\
             Create affirmations that are specific, present-tense, and positive.\n\
             Aim for 5-10 affirmations depending on the requested length."
        ),
        ContentType::ExpositoryWriting => format!(
            "Write an informative piece that explains a topic related to the {genre} genre.\n\
             Organize the information logically with clear paragraphs and transitions.\n\
             Use proper paragraph breaks with blank lines between paragraphs.\n\
             Maintain a {mood} tone throughout the explanation.\n\
             Use emphasis (italics) for key terms or concepts by placing _underscores_ around them.\n\
             Consider using subheadings for different sections (if appropriate).\n\
             Use examples and details to clarify concepts.\n\
             Ensure the writing is accessible and educational.\n\
             Conclude with a summary of the main points."
        ),
        ContentType::PlayScript => format!(
            "Format your response as a script with character names, dialogue, and stage directions.\n\
             Use proper script formatting with character names in uppercase before their lines.\n\
             Include stage directions in parentheses.\n\
             Format:\n\
             CHARACTER NAME:\n\
             (stage direction)\n\
             Dialogue text here.\n\n\
             ANOTHER CHARACTER:\n\
             (stage direction)\n\
             Response dialogue here.\n\n\
             Create a scene that reflects the {genre} genre with a {mood} mood.\n\
             Include a clear dramatic situation with a beginning, middle, and end.\n\
             Use blank lines between different characters' dialogue blocks."
        ),
        ContentType::PhilosophicalWriting => format!(
            "Create a philosophical exploration of a concept related to the {genre} genre.\n\
             Use a {mood} tone throughout the writing.\n\
             Organize into clear paragraphs with blank lines between them.\n\
             Include thought-provoking questions and insights.\n\
             Use emphasis (italics) for key philosophical concepts by placing _underscores_ around them.\n\
             Structure the writing with clear paragraphs that build on each other.\n\
             Include references to philosophical traditions or thinkers if appropriate.\n\
             Conclude with a meaningful insight or question for reflection."
        ),
        ContentType::SocialMediaCaption => format!(
            "Create engaging social media captions that are optimized for the platform.\n\
             Generate multiple caption options (3-5) that reflect the {mood} mood and {genre} theme.\n\
             Each caption should be separated by blank lines for clarity.\n\
             For Instagram: attention-grabbing, visually descriptive captions with 5-7 relevant hashtags at the end.\n\
             For Twitter: short, impactful captions within character limits with 1-2 hashtags.\n\
             For LinkedIn: professional captions that still maintain the {mood} tone and add value related to the {genre}.\n\
             Format each caption option clearly with a number or platform indicator.\n\
             Use emphasis (italics) for key words by placing _underscores_ around them.\n\
             Make the captions authentic, engaging, and aligned with the specified mood and genre."
        ),
    }
}

fn default_format_guide(mood: Mood, genre: Genre) -> String {
    format!(
        "Format your response as a complete piece of writing with proper structure.\n\
         Use appropriate paragraph breaks with blank lines between paragraphs.\n\
         Ensure the writing reflects the {genre} genre and maintains a {mood} mood.\n\
         Use emphasis (italics) for important words or phrases by placing _underscores_ around them.\n\
         Organize your writing with appropriate structure and clear transitions.\n\
         Make the content engaging and original."
    )
}

/// Structural guide keyed by length: stanza, paragraph, quote, and exchange
/// counts scale with the word budget. `None` gets the default guide.
pub fn structure_guide(length: Option<Length>) -> &'static str {
    let Some(length) = length else {
        return DEFAULT_STRUCTURE_GUIDE;
    };
    match length {
        Length::VeryShort => {
            "Length: Very Short (50-100 words)\n\n\
             For this very short length:\n\
             - If poetry: 1-2 short stanzas with clear line breaks\n\
             - If prose: 1-2 short paragraphs with blank lines between them\n\
             - If quotes: 2-3 impactful quotes, each on separate lines\n\
             - If dialogue: A brief exchange of 3-5 lines with proper formatting\n\n\
             Despite the brevity, ensure proper formatting with appropriate line breaks and paragraph spacing."
        }
        Length::Short => {
            "Length: Short (100-250 words)\n\n\
             For this short length:\n\
             - If poetry: 2-3 stanzas with clear line breaks\n\
             - If prose: 2-3 paragraphs with blank lines between them\n\
             - If quotes: 3-5 meaningful quotes, each on separate lines\n\
             - If dialogue: A concise scene with 5-10 exchanges and proper formatting\n\n\
             Maintain proper formatting with appropriate line breaks and paragraph spacing."
        }
        Length::Medium => {
            "Length: Medium (250-500 words)\n\n\
             For this medium length:\n\
             - If poetry: 3-5 well-developed stanzas with clear line breaks\n\
             - If prose: 4-6 paragraphs with blank lines between them\n\
             - If quotes: 5-7 substantial quotes, each on separate lines\n\
             - If dialogue: A developed scene with 10-15 exchanges and proper formatting\n\n\
             Use proper formatting with clear section breaks, paragraph spacing, and emphasis where appropriate."
        }
        Length::Long => {
            "Length: Long (500-1000 words)\n\n\
             For this long length:\n\
             - If poetry: 5-7 rich stanzas or multiple poem sections with clear line breaks\n\
             - If prose: 7-10 well-developed paragraphs with blank lines between them\n\
             - If quotes: 7-10 in-depth quotes with context, each on separate lines\n\
             - If dialogue: An extended scene with 15-25 exchanges and descriptive elements\n\n\
             Use proper formatting with clear section breaks, paragraph spacing, and emphasis where appropriate.\n\
             Consider using subheadings or section breaks for longer pieces to improve readability."
        }
    }
}

const DEFAULT_STRUCTURE_GUIDE: &str =
    "Length: Medium (250-500 words)\n\n\
     Use proper formatting with clear paragraph breaks and appropriate spacing.\n\
     Ensure the piece is well-structured with a beginning, middle, and end.\n\
     Format according to the content type with appropriate line breaks and emphasis.";

const FORMATTING_RULES: &str =
    "IMPORTANT FORMATTING INSTRUCTIONS:\n\
     1. Use proper paragraph breaks with blank lines between paragraphs.\n\
     2. For poetry, use line breaks for each line and blank lines between stanzas.\n\
     3. For dialogue, use proper quotation marks and paragraph breaks for new speakers.\n\
     4. For emphasis, use _underscores_ around words or phrases that should be emphasized (this will be rendered as italics).\n\
     5. For lists or structured content, use proper formatting with line breaks.\n\
     6. Do not include any additional commentary, explanations, or titles unless specifically requested.\n\
     7. Maintain consistent formatting throughout the entire piece.\n\
     8. Use blank lines to separate sections or stanzas for better readability.\n\
     9. For quotes or affirmations, place each one on a separate line with proper attribution if applicable.\n\n\
     Your response will be displayed exactly as you format it, so proper spacing and line breaks are essential.";
