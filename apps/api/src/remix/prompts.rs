// Prompt constants for the remix relay.

use crate::remix::platforms::PlatformGuide;

/// Fixed system persona, sent both as the system message and inside the user prompt.
pub const PERSONA: &str = "你是一位拥有100万粉丝的顶级中文社交媒体文案创作者，精通情绪化表达、分段排版、Emoji使用以及互动引导。\
你的任务是把任何长文内容快速重塑为特定平台（如小红书、Twitter Thread）的爆款风格。\
务必用流畅自然的中文输出，保证格式规整、可直接发布。";

/// Final prompt template.
/// Replace: {persona}, {rules}, {label}, then {content} last so user text is never rescanned.
pub const REMIX_PROMPT_TEMPLATE: &str = "[System Persona]
{persona}

[平台风格要求]
{rules}

[用户输入内容]
{content}

[指令]
请严格按照平台「{label}」的规则，输出可直接发布的爆款文案。只输出最终文案，不要解释。";

/// Merges the persona, the guide's rules and already-trimmed user content.
pub fn build_prompt(guide: &PlatformGuide, content: &str) -> String {
    REMIX_PROMPT_TEMPLATE
        .replace("{persona}", PERSONA)
        .replace("{rules}", guide.rules)
        .replace("{label}", guide.label)
        .replace("{content}", content)
}
