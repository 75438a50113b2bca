//! Starter code for the problem workspace

use crate::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Languages the workspace can hand out templates for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    Cpp,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::Python,
        Language::Cpp,
        Language::JavaScript,
    ];

    /// Editor mode identifier
    pub fn mode(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::JavaScript => "javascript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mode())
    }
}

impl FromStr for Language {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            "cpp" | "c++" => Ok(Language::Cpp),
            "javascript" | "js" => Ok(Language::JavaScript),
            _ => Err(ArenaError::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

/// Starter template exposing `function_name` as the entry point
pub fn language_boilerplate(language: Language, function_name: &str) -> String {
    match language {
        Language::Java => format!(
            "class Solution {{\n    public int {function_name}(int[] nums) {{\n        // Write your code here\n        return 0;\n    }}\n}}"
        ),
        Language::Python => format!(
            "class Solution:\n    def {function_name}(self, nums: List[int]) -> int:\n        # Write your code here\n        pass"
        ),
        Language::Cpp => format!(
            "class Solution {{\npublic:\n    int {function_name}(vector<int>& nums) {{\n        // Write your code here\n        return 0;\n    }}\n}};"
        ),
        Language::JavaScript => format!(
            "/**\n * @param {{number[]}} nums\n * @return {{number}}\n */\nfunction {function_name}(nums) {{\n    // Write your code here\n    return 0;\n}}"
        ),
    }
}
