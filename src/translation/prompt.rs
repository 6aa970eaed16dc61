use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

const TASK_RULES: &str = "You will translate texts from English academic papers written in LaTeX into Chinese.
You will translate only the text contents, while keep commands such as “~\\cite{}” or “~\\ref{}” the way they were originally.
You will use Chinese in a fluent and academic style.
You will insert a new line whenever there is a sentence terminating, marked by a “。”, “！”, “？” etc.
You will return the result in code format.
You will translate terms according to following rules:
";

const WORKED_EXAMPLE: &str = r"
Here is an example.

Original LaTeX in English:
To design such a planning process, we return to the origins of artificial intelligence (and cognitive science), drawing inspiration from the planning processes explored by Newell, Shaw, and Simon starting in the 1950s~\cite{newell1959report, newell1972human}. Newell and colleagues characterized 
 problem solving~\cite\{newell1959report}
as search through a combinatorial problem space, represented as a tree.  We thus propose the Tree of Thoughts (ToT) framework for general problem solving with language models. As Figure~\ref{fig:schematic} illustrates, while existing methods (detailed below) sample continuous language sequences for problem solving, ToT actively maintains a tree of thoughts, where each {\em thought} is a coherent language sequence that serves as an intermediate step toward problem solving (Table~\ref{tab:overview}).

Translated LaTeX in Chinese:
为了设计这样一个规划过程，我们回到人工智能（和认知科学）的起源，借鉴了Newell、Shaw和Simon在1950年代开始探索的规划过程~\cite{newell1959report, newell1972human}。
Newell和同事将问题求解~\cite{newell1959report}描述为对组合问题空间的搜索，其表示为一棵树。
因此，我们提出了“思维树”（Tree of Thoughts，ToT）框架，用于基于语言模型的通用问题求解。
如图~\ref{fig:schematic} 所示，现有方法（详见下文）通过采样连续的语言序列进行问题求解，而ToT则主动地维护一棵思维之树，其中每个“思维”是一个连贯的语言序列，作为解决问题的中间步骤（表~\ref{tab:overview}）。

Here is the case you will work on.

Original LaTeX in English:
";

const ANSWER_HEADER: &str = "\n\nTranslated LaTeX in Chinese:\n";

/// Fixed term translations and terms that must stay in English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glossary {
    /// English term to its required Chinese rendering.
    pub terms: BTreeMap<String, String>,
    /// Terms copied through untranslated.
    pub keep: Vec<String>,
}

impl Default for Glossary {
    fn default() -> Self {
        let terms = [("prompt", "提示词"), ("something-based", "基于某某的")]
            .into_iter()
            .map(|(en, zh)| (en.to_string(), zh.to_string()))
            .collect();

        Self {
            terms,
            keep: vec!["token".to_string()],
        }
    }
}

/// Builds the single-turn instruction asking the model to translate `original`.
pub fn build_prompt(original: &str, glossary: &Glossary) -> String {
    let mut prompt = String::from(TASK_RULES);

    for (term, translation) in &glossary.terms {
        let _ = writeln!(prompt, "“{term}” will be translated to “{translation}”;");
    }
    for term in &glossary.keep {
        let _ = writeln!(prompt, "“{term}” will be kept as “{term}”, without being translated;");
    }

    prompt.push_str(WORKED_EXAMPLE);
    prompt.push_str(original);
    prompt.push_str(ANSWER_HEADER);
    prompt
}
