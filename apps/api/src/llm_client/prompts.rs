// Cross-cutting prompt fragments. Each service that needs LLM calls defines
// its own prompts.rs alongside it; this file holds what they all share.

/// Style instruction sent with every call, regardless of provider. OpenAI
/// receives it as a system message; Anthropic and Gemini receive it as a
/// prefix on the user content.
pub const CAREER_ADVISOR_SYSTEM: &str = "You are a professional career advisor helping create \
    impressive resumes and presentations. Be concise, professional, and impactful.";
