use crate::reels::application::domain::script::{self, ReelScript};
use crate::reels::application::ports::outgoing::{
    CompletionRequest, TextGenerationError, TextGenerator,
};

const SCRIPT_SYSTEM_PROMPT: &str = "You are a sports historian who creates brief, engaging \
historical narratives about sports celebrities. Create concise scripts suitable for short \
30-60 second video reels. DO NOT include any narrator credits, audio attributions, or phrases \
like \"narrated by\" or \"OpenAI shorts\" in your response. The script should ONLY contain \
factual information about the athlete without any video-style openings or closings. Do not \
mention that this is a \"short\" or \"reel\" or any other video format. Do not include any \
call to action, subscription request, thanks for watching, or other social media style ending.";

const IMAGE_PROMPT_SYSTEM_PROMPT: &str = "You are an AI that creates detailed image prompts \
for sports celebrities. Create vivid, photorealistic descriptions that will work well with \
DALL-E to generate high-quality images of the athlete.";

/// Chat-completion request for the narration script.
pub fn script_request(name: &str, sport: &str) -> CompletionRequest {
    CompletionRequest {
        system: SCRIPT_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Create a brief historical script about {name}, a famous {sport} athlete. The \
             script should be engaging, informative, and suitable for a 30-60 second video \
             reel. Include key achievements, records, and interesting facts about their \
             career. Also provide a catchy title for this reel. DO NOT include any audio \
             credits, references to shorts/videos, or speaker references. Write only factual \
             information about the athlete without any video-style formatting or closings."
        ),
        max_tokens: 400,
        temperature: 0.6,
    }
}

/// Chat-completion request for the DALL-E prompt list, grounded in the
/// already-generated script.
pub fn image_prompt_request(name: &str, sport: &str, script: &str) -> CompletionRequest {
    CompletionRequest {
        system: IMAGE_PROMPT_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Create 3 detailed image prompts for {name}, a famous {sport} athlete. Each \
             prompt should create a photorealistic, high-quality image showing the athlete \
             in different scenarios:\n\
             1. A close-up portrait showing their face clearly\n\
             2. An action shot of them playing {sport}\n\
             3. A celebratory moment or iconic pose they're known for\n\n\
             Make each prompt very detailed with specific visual elements. Begin each prompt \
             with \"Photorealistic image of {name},\" and include physical details about the \
             athlete.\nBase the prompts on this information: {script}"
        ),
        max_tokens: 250,
        temperature: 0.6,
    }
}

/// Ask for image prompts and parse the list. Any failure degrades to the
/// single generic fallback prompt instead of surfacing an error; image
/// prompts are never worth failing a run over.
pub async fn generate_image_prompts<T>(
    generator: &T,
    name: &str,
    sport: &str,
    script: &str,
) -> Vec<String>
where
    T: TextGenerator + ?Sized,
{
    match generator
        .complete(image_prompt_request(name, sport, script))
        .await
    {
        Ok(content) => script::parse_image_prompts(&content, name, sport),
        Err(err) => {
            tracing::warn!(%err, "Image prompt generation failed, using fallback prompt");
            vec![script::fallback_image_prompt(name, sport)]
        }
    }
}

/// Produces the narration script for one athlete.
pub struct ScriptGenerator<T>
where
    T: TextGenerator,
{
    generator: T,
}

impl<T> ScriptGenerator<T>
where
    T: TextGenerator,
{
    pub fn new(generator: T) -> Self {
        Self { generator }
    }

    /// One completion call, then title extraction and sanitization.
    pub async fn generate(
        &self,
        name: &str,
        sport: &str,
    ) -> Result<ReelScript, TextGenerationError> {
        let content = self.generator.complete(script_request(name, sport)).await?;
        Ok(ReelScript::parse(&content, name, sport))
    }
}
