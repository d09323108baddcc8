//! Fixed few-shot prompt chains.

use super::{ChatMessage, ChatPayload, Modality};

const NAMING_EXEMPLAR: &str = "Input: {You are a copywriting master who helps me name design/art works. The names need to have literary connotation, focus on conciseness and artistic conception, express the atmosphere and mood of the work, making the name both concise and poetic.} [zh-CN]";

const BUSINESS_PLAN_BODY: &str = "You are a business plan writing expert who can provide plan generation including creative names, short slogans, target user personas, user pain points, main value propositions, sales/marketing channels, revenue streams, cost structures, etc.";

const API_DOCS_EXEMPLAR: &str = concat!(
    "Input: {\n",
    "Write user documentation for developers on API usage in a normal manner. ",
    "You need to provide easy-to-use and readable documentation content from the user's perspective.\n\n",
    "An example of a standard API documentation is as follows:\n\n",
    "```markdown\n",
    "---\n",
    "title: useWatchPluginMessage\n",
    "description: Listen for plugin messages from LobeChat\n",
    "nav: API\n",
    "---\n\n",
    "`useWatchPluginMessage` is a React Hook encapsulated by the Chat Plugin SDK for listening to plugin messages sent from LobeChat.\n",
    "} [ru-RU]",
);

/// Named prompt chain, for callers that pick a chain at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChain {
    /// [`chain_lang_detect`]
    LangDetect,
    /// [`chain_summary_agent_name`]
    AgentName,
    /// [`chain_summary_description`]
    Description,
    /// [`chain_summary_tags`]
    Tags,
    /// [`chain_summary_generation_title`]
    GenerationTitle,
}

impl PromptChain {
    /// Get all chains
    pub fn all() -> &'static [PromptChain] {
        &[
            PromptChain::LangDetect,
            PromptChain::AgentName,
            PromptChain::Description,
            PromptChain::Tags,
            PromptChain::GenerationTitle,
        ]
    }

    /// Get the chain name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LangDetect => "lang-detect",
            Self::AgentName => "agent-name",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::GenerationTitle => "generation-title",
        }
    }

    /// Build the chain's payload.
    ///
    /// `GenerationTitle` treats each line of `content` as one prompt.
    pub fn build(&self, content: &str, locale: &str, modality: Modality) -> ChatPayload {
        match self {
            Self::LangDetect => chain_lang_detect(content),
            Self::AgentName => chain_summary_agent_name(content, locale),
            Self::Description => chain_summary_description(content, locale),
            Self::Tags => chain_summary_tags(content, locale),
            Self::GenerationTitle => {
                let prompts: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();
                chain_summary_generation_title(&prompts, modality, locale)
            },
        }
    }
}

impl std::fmt::Display for PromptChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PromptChain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        PromptChain::all()
            .iter()
            .copied()
            .find(|chain| chain.name() == normalized)
            .ok_or_else(|| format!("Unknown prompt chain: {}", s))
    }
}

/// Detect the locale of `content`.
pub fn chain_lang_detect(content: &str) -> ChatPayload {
    ChatPayload::new(vec![
        ChatMessage::system(
            "You are a language expert proficient in all world languages. You need to identify the language of the user input and output it in the international standard locale format.",
        ),
        ChatMessage::user("{你好}"),
        ChatMessage::assistant("zh-CN"),
        ChatMessage::user("{hello}"),
        ChatMessage::assistant("en-US"),
        ChatMessage::user(format!("{{{content}}}")),
    ])
}

/// Summarize an agent description into a short role name.
pub fn chain_summary_agent_name(content: &str, locale: &str) -> ChatPayload {
    ChatPayload::new(vec![
        ChatMessage::system(
            "You are a naming expert skilled at creating concise, meaningful names with literary depth and artistic conception. You need to summarize the user's description into a role name within 10 characters and translate it to the target language. Format requirements:\nInput: {text as JSON quoted string} [locale]\nOutput: {role name}",
        ),
        ChatMessage::user(NAMING_EXEMPLAR),
        ChatMessage::user(
            "Input: {You are a UX Writer skilled at transforming plain descriptions into refined expressions. Next, the user will input a text, and you need to convert it into a better expression, with a length not exceeding 40 characters.} [ru-RU]",
        ),
        ChatMessage::assistant("Творческий редактор UX"),
        ChatMessage::user(
            "Input: {You are a frontend code expert. Please convert the code below to TS without modifying the implementation. If there are global variables not defined in the original JS, you need to add type declarations using declare.} [en-US]",
        ),
        ChatMessage::assistant("TS Transformer"),
        ChatMessage::user(
            "Input: {Improve my English language use by replacing basic A0-level expressions with more sophisticated, advanced-level phrases while maintaining the conversation's essence. Your responses should focus solely on corrections and enhancements, avoiding additional explanations.} [zh-CN]",
        ),
        ChatMessage::assistant("Email Optimization Assistant"),
        ChatMessage::user(format!("Input: {{{content}}} [{locale}]")),
    ])
}

/// Summarize an agent description into a skill profile. Temperature is 0.
pub fn chain_summary_description(content: &str, locale: &str) -> ChatPayload {
    ChatPayload::new(vec![
        ChatMessage::system(format!(
            "You are an assistant skilled at summarizing skills. You need to summarize the user's input into a role skill profile within 20 characters. The content should ensure clear information, logical clarity, and effectively convey the role's skills and experience, and translate it to the target language: {locale}. Format requirements:\nInput: {{text as JSON quoted string}} [locale]\nOutput: {{profile}}"
        )),
        ChatMessage::user(NAMING_EXEMPLAR),
        ChatMessage::assistant("Good at naming creative art works"),
        ChatMessage::user(format!("Input: {{{BUSINESS_PLAN_BODY}}} [en-US]")),
        ChatMessage::assistant("Good at business plan writing and consulting"),
        ChatMessage::user(
            "Input: {You are a frontend expert. Please convert the code below to TS without modifying the implementation. If there are global variables not defined in the original JS, you need to add type declarations using declare.} [zh-CN]",
        ),
        ChatMessage::assistant("Good at TS conversion and type declaration"),
        ChatMessage::user(API_DOCS_EXEMPLAR),
        ChatMessage::assistant(
            "Специализируется на создании хорошо структурированной и профессиональной документации README для GitHub с точными техническими терминами",
        ),
        ChatMessage::user(format!("Input: {{{BUSINESS_PLAN_BODY}}} [zh-CN]")),
        ChatMessage::assistant("Good at business plan writing and consulting"),
        ChatMessage::user(format!("输入: {{{content}}} [{locale}]")),
    ])
    .with_temperature(0.0)
}

/// Extract up to five classification tags.
pub fn chain_summary_tags(content: &str, locale: &str) -> ChatPayload {
    ChatPayload::new(vec![
        ChatMessage::system(
            "You are an assistant skilled at summarizing conversation tags. You need to extract classification tags from the user's input, separated by `,`, no more than 5 tags, and translate them to the target language. Format requirements:\nInput: {text as JSON quoted string} [locale]\nOutput: {tags}",
        ),
        ChatMessage::user(NAMING_EXEMPLAR),
        ChatMessage::assistant("naming,writing,creativity"),
        ChatMessage::user(
            "Input: {You are a professional translator proficient in Simplified Chinese, and have participated in the translation work of the Chinese versions of The New York Times and The Economist. Therefore, you have a deep understanding of translating news and current affairs articles. I hope you can help me translate the following English news paragraphs into Chinese, with a style similar to the Chinese versions of the aforementioned magazines.} [zh-CN]",
        ),
        ChatMessage::assistant("translation,writing,copywriting"),
        ChatMessage::user(format!("Input: {{{BUSINESS_PLAN_BODY}}} [en-US]")),
        ChatMessage::assistant("entrepreneurship,planning,consulting"),
        ChatMessage::user(format!("输入: {{{content}}} [{locale}]")),
    ])
}

/// Title for a series of image/video generation prompts.
///
/// Prompts are numbered from 1, one per line.
pub fn chain_summary_generation_title<S: AsRef<str>>(
    prompts: &[S],
    modality: Modality,
    locale: &str,
) -> ChatPayload {
    let formatted = prompts
        .iter()
        .enumerate()
        .map(|(i, prompt)| format!("{}. {}", i + 1, prompt.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    ChatPayload::new(vec![
        ChatMessage::system(format!(
            "You are a senior AI art creator and language master. You need to summarize a title based on the AI {modality} prompt provided by the user. This title should concisely describe the core content of the creation and will be used to identify and manage this series of works. The word count should be limited to within 10 characters, no punctuation is needed, and the output language is: {locale}."
        )),
        ChatMessage::user(format!("Prompt:\n{formatted}")),
    ])
}
