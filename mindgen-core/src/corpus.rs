// Static topic corpus and URL annotations

use crate::error::{MindMapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subtopics: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, subtopics: &[&str]) -> Self {
        Self {
            name: name.into(),
            subtopics: subtopics.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub keyword: String,
    pub categories: Vec<Category>,
}

/// Keyword lookup result. `matched` is false for the generic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTopic {
    pub keyword: String,
    pub categories: Vec<Category>,
    pub matched: bool,
}

/// Topics are kept in declaration order; lookup returns the first match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub urls: HashMap<String, String>,
}

const BUILTIN_TOPICS: &[(&str, &[(&str, &[&str])])] = &[
    (
        "人工智能",
        &[
            ("概念定义", &["什么是人工智能", "AI的历史", "强AI与弱AI", "图灵测试"]),
            (
                "核心技术",
                &["机器学习", "深度学习", "神经网络", "自然语言处理", "计算机视觉"],
            ),
            (
                "应用领域",
                &["医疗诊断", "自动驾驶", "智能客服", "推荐系统", "智能家居"],
            ),
            ("伦理问题", &["隐私保护", "就业影响", "算法偏见", "安全风险"]),
            ("未来发展", &["人机共生", "通用人工智能", "意识问题研究"]),
        ],
    ),
    (
        "Web开发",
        &[
            (
                "前端开发",
                &["HTML", "CSS", "JavaScript", "React", "Vue", "Angular"],
            ),
            (
                "后端开发",
                &["Node.js", "Python", "Java", "PHP", "Go", "数据库"],
            ),
            ("开发工具", &["VS Code", "Git", "Docker", "CI/CD", "测试工具"]),
            (
                "网站架构",
                &["前后端分离", "微服务", "Serverless", "CDN", "负载均衡"],
            ),
            ("性能优化", &["代码分割", "懒加载", "缓存策略", "网络优化", "SEO"]),
        ],
    ),
    (
        "数据科学",
        &[
            ("基础概念", &["统计学基础", "概率论", "线性代数", "微积分"]),
            ("数据处理", &["数据清洗", "特征工程", "数据转换", "降维"]),
            ("机器学习", &["监督学习", "无监督学习", "强化学习", "模型评估"]),
            (
                "数据可视化",
                &["图表类型", "可视化工具", "交互式可视化", "数据叙事"],
            ),
            ("应用领域", &["商业智能", "预测分析", "推荐系统", "风险评估"]),
        ],
    ),
];

const BUILTIN_URLS: &[(&str, &str)] = &[
    ("人工智能", "https://zh.wikipedia.org/wiki/人工智能"),
    ("机器学习", "https://zh.wikipedia.org/wiki/机器学习"),
    ("深度学习", "https://zh.wikipedia.org/wiki/深度学习"),
    ("神经网络", "https://zh.wikipedia.org/wiki/人工神经网络"),
    ("自然语言处理", "https://zh.wikipedia.org/wiki/自然语言处理"),
    ("计算机视觉", "https://zh.wikipedia.org/wiki/计算机视觉"),
    ("Web开发", "https://developer.mozilla.org/zh-CN/docs/Learn"),
    ("HTML", "https://developer.mozilla.org/zh-CN/docs/Web/HTML"),
    ("CSS", "https://developer.mozilla.org/zh-CN/docs/Web/CSS"),
    ("JavaScript", "https://developer.mozilla.org/zh-CN/docs/Web/JavaScript"),
    ("React", "https://reactjs.org/"),
    ("Vue", "https://vuejs.org/"),
    ("Node.js", "https://nodejs.org/"),
    ("数据科学", "https://zh.wikipedia.org/wiki/数据科学"),
    ("统计学", "https://zh.wikipedia.org/wiki/统计学"),
    ("概率论", "https://zh.wikipedia.org/wiki/概率论"),
    ("数据可视化", "https://zh.wikipedia.org/wiki/数据可视化"),
];

impl Corpus {
    /// The example corpus shipped with the binary.
    pub fn builtin() -> Self {
        let topics = BUILTIN_TOPICS
            .iter()
            .map(|(keyword, categories)| Topic {
                keyword: keyword.to_string(),
                categories: categories
                    .iter()
                    .map(|(name, subtopics)| Category::new(*name, subtopics))
                    .collect(),
            })
            .collect();

        let urls = BUILTIN_URLS
            .iter()
            .map(|(term, url)| (term.to_string(), url.to_string()))
            .collect();

        Self { topics, urls }
    }

    /// Load a corpus from a JSON file with the same shape as [`Corpus`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let corpus: Corpus = serde_json::from_str(&content)?;
        corpus.validate()?;
        debug!(
            "Loaded corpus from {} ({} topics, {} urls)",
            path.display(),
            corpus.topics.len(),
            corpus.urls.len()
        );
        Ok(corpus)
    }

    /// Every topic needs a non-blank keyword and at least one category, and
    /// every category at least one subtopic. A blank keyword would match any
    /// request, and an empty branch would cut the tree short of its depth.
    pub fn validate(&self) -> Result<()> {
        for (i, topic) in self.topics.iter().enumerate() {
            if topic.keyword.trim().is_empty() {
                return Err(MindMapError::InvalidCorpus(format!(
                    "topic #{} has a blank keyword",
                    i + 1
                )));
            }
            if topic.categories.is_empty() {
                return Err(MindMapError::InvalidCorpus(format!(
                    "topic '{}' has no categories",
                    topic.keyword
                )));
            }
            if let Some(category) = topic.categories.iter().find(|c| c.subtopics.is_empty()) {
                return Err(MindMapError::InvalidCorpus(format!(
                    "category '{}' of topic '{}' has no subtopics",
                    category.name, topic.keyword
                )));
            }
        }
        Ok(())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.keyword.as_str())
    }

    pub fn url_for(&self, term: &str) -> Option<&str> {
        self.urls.get(term).map(String::as_str)
    }

    /// Case-insensitive match in either direction: the corpus key contains
    /// the keyword, or the keyword contains the corpus key.
    pub fn find(&self, keyword: &str) -> Option<&Topic> {
        let needle = keyword.to_lowercase();
        self.topics.iter().find(|topic| {
            let key = topic.keyword.to_lowercase();
            key.contains(&needle) || needle.contains(&key)
        })
    }

    /// Resolve a keyword to a topic, falling back to the generic template.
    pub fn resolve(&self, keyword: &str) -> ResolvedTopic {
        match self.find(keyword) {
            Some(topic) => ResolvedTopic {
                keyword: topic.keyword.clone(),
                categories: topic.categories.clone(),
                matched: true,
            },
            None => ResolvedTopic {
                keyword: keyword.to_string(),
                categories: fallback_categories(keyword),
                matched: false,
            },
        }
    }
}

fn fallback_categories(keyword: &str) -> Vec<Category> {
    vec![
        Category {
            name: format!("{keyword}的基本概念"),
            subtopics: vec![
                format!("{keyword}的定义"),
                format!("{keyword}的历史"),
                format!("{keyword}的特点"),
            ],
        },
        Category {
            name: format!("{keyword}的应用"),
            subtopics: vec![
                format!("{keyword}在行业中的应用"),
                format!("{keyword}的实际案例"),
                format!("{keyword}的前景"),
            ],
        },
        Category {
            name: format!("{keyword}的发展"),
            subtopics: vec![
                format!("{keyword}的现状"),
                format!("{keyword}的趋势"),
                format!("{keyword}的挑战"),
            ],
        },
        Category::new("相关技术", &["相关领域1", "相关领域2", "相关领域3"]),
        Category::new("学习资源", &["书籍推荐", "在线课程", "实践项目"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declared_order() {
        let corpus = Corpus::builtin();
        let keywords: Vec<&str> = corpus.keywords().collect();
        assert_eq!(keywords, vec!["人工智能", "Web开发", "数据科学"]);
        assert_eq!(corpus.urls.len(), 17);
    }

    #[test]
    fn test_find_is_bidirectional_and_case_insensitive() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.find("人工").unwrap().keyword, "人工智能");
        assert_eq!(corpus.find("人工智能入门").unwrap().keyword, "人工智能");
        assert_eq!(corpus.find("WEB开发").unwrap().keyword, "Web开发");
        assert!(corpus.find("区块链").is_none());
    }

    #[test]
    fn test_first_declared_match_wins() {
        // Contains both "人工智能" and "数据科学"
        let corpus = Corpus::builtin();
        assert_eq!(corpus.find("数据科学与人工智能").unwrap().keyword, "人工智能");
    }

    #[test]
    fn test_builtin_is_valid() {
        assert!(Corpus::builtin().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_topics() {
        let blank = Corpus {
            topics: vec![Topic {
                keyword: "  ".to_string(),
                categories: vec![Category::new("x", &["y"])],
            }],
            urls: HashMap::new(),
        };
        let err = blank.validate().unwrap_err();
        assert!(matches!(err, MindMapError::InvalidCorpus(_)));
        assert!(err.to_string().contains("blank keyword"));

        let no_categories = Corpus {
            topics: vec![Topic {
                keyword: "烹饪".to_string(),
                categories: vec![],
            }],
            urls: HashMap::new(),
        };
        assert!(no_categories.validate().unwrap_err().to_string().contains("no categories"));

        let no_subtopics = Corpus {
            topics: vec![Topic {
                keyword: "烹饪".to_string(),
                categories: vec![Category::new("刀工", &[])],
            }],
            urls: HashMap::new(),
        };
        assert!(no_subtopics.validate().unwrap_err().to_string().contains("'刀工'"));
    }

    #[test]
    fn test_resolve_fallback() {
        let resolved = Corpus::builtin().resolve("区块链");
        assert!(!resolved.matched);
        assert_eq!(resolved.keyword, "区块链");
        assert_eq!(resolved.categories.len(), 5);
        assert_eq!(resolved.categories[0].name, "区块链的基本概念");
        assert_eq!(resolved.categories[1].subtopics[0], "区块链在行业中的应用");
    }
}
