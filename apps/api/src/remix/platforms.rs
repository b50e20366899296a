//! Platform guides — the style rules each target platform imposes on the copy.
//!
//! The table is built once at startup and shared read-only through `AppState`.
//! Lookups never fail: an unknown or missing key resolves to the default guide.

use serde::Serialize;

/// Key of the guide used when a request names no platform or an unknown one.
pub const DEFAULT_PLATFORM: &str = "xiaohongshu";

/// A named template of content rules for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformGuide {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub rules: &'static str,
}

const XIAOHONGSHU_RULES: &str = "平台：小红书
- 标题：必须符合爆款模板（震惊体/疑问句/数字开头），并混用1-3个Emoji。
- 开头：第一句是强情绪钩子，例如“姐妹们，听我说！”或“天呐！我才发现……”
- 正文：短句+多换行，关键语句使用**加粗**，每个自然段落加入2-5个Emoji。
- 结尾：加入点赞、收藏、评论等互动号召。
- 标签：末尾生成5-8个#话题标签。";

const DOUYIN_RULES: &str = "平台：抖音短视频口播
- 开头：前1秒直接抛出强钩子或痛点，如“别再…了！”“30秒教你…”
- 脚本：按「痛点→故事/方案→步骤/亮点→好处」分段输出，段落短且口语化。
- 场景提示：可穿插【镜头】或【画面】提示，帮助剪辑师理解节奏。
- 表达：适量 Emoji 或拟声词提升节奏感，多用命令句与疑问句制造互动。
- 收尾：加上点赞、关注、评论引导，可附上 CTA（如“想要模板的评论区扣1”）。";

const WECHAT_ARTICLE_RULES: &str = "平台：微信公众号推文
- 标题：20字以内，制造悬念或给出明确收益，避免标题党式夸张。
- 导语：开头用一段不超过3行的场景或金句，直接点出读者痛点。
- 结构：使用3-5个小标题分节，每节围绕一个观点展开，段落不超过4行。
- 重点：关键结论单独成段并**加粗**，可适当使用引用块呈现金句。
- 结尾：总结核心观点，并引导“点赞、在看、转发”或留言讨论。";

const TWITTER_THREAD_RULES: &str = "平台：Twitter Thread
- 结构：输出5-10条推文，每条以「1/」「2/」等编号开头，单条不超过280字符。
- 首条：用一句强观点或反常识结论做钩子，并预告这串推文的价值。
- 中段：每条只讲一个要点，句子短促有力，可用列表或数据增强说服力。
- 表达：Emoji 克制使用（每条最多1个），避免长段落。
- 末条：总结要点，并引导转推、关注或回复讨论，可附1-2个#标签。";

const LINKEDIN_POST_RULES: &str = "平台：LinkedIn 专业帖
- 开头：前两行给出职业洞察或反直觉结论，吸引用户点击“查看更多”。
- 正文：以个人经验或案例为线索，分享可复用的方法论，语气专业而真诚。
- 排版：短段落+空行，要点可用「→」或数字列表呈现，Emoji 点到为止。
- 价值：突出对职业成长、团队管理或行业趋势的启发，避免硬广。
- 结尾：抛出一个开放式问题邀请评论，末尾附3-5个行业#话题标签。";

const BILIBILI_SCRIPT_RULES: &str = "平台：B站视频口播脚本
- 开场：用“哈喽大家好”之外的新鲜开场，前10秒抛出本期看点或悬念。
- 结构：按「引入→知识点/故事展开→干货总结」分段，每段标注大致时长。
- 语气：口语化、有梗但不低俗，可适度玩梗和自嘲，拉近与观众距离。
- 互动：在关键节点插入弹幕互动提示（如“觉得有用的扣个1”）。
- 结尾：引导一键三连（点赞、投币、收藏）并预告下期内容。";

/// Read-only table of all known platform guides, in display order.
#[derive(Debug, Clone)]
pub struct PlatformGuides {
    guides: Vec<PlatformGuide>,
}

impl PlatformGuides {
    /// Builds the built-in guide table.
    pub fn builtin() -> Self {
        Self {
            guides: vec![
                PlatformGuide {
                    key: "xiaohongshu",
                    label: "小红书",
                    rules: XIAOHONGSHU_RULES,
                },
                PlatformGuide {
                    key: "douyin",
                    label: "抖音",
                    rules: DOUYIN_RULES,
                },
                PlatformGuide {
                    key: "wechat-article",
                    label: "微信公众号",
                    rules: WECHAT_ARTICLE_RULES,
                },
                PlatformGuide {
                    key: "twitter-thread",
                    label: "Twitter Thread",
                    rules: TWITTER_THREAD_RULES,
                },
                PlatformGuide {
                    key: "linkedin-post",
                    label: "LinkedIn",
                    rules: LINKEDIN_POST_RULES,
                },
                PlatformGuide {
                    key: "bilibili-script",
                    label: "B站",
                    rules: BILIBILI_SCRIPT_RULES,
                },
            ],
        }
    }

    pub fn all(&self) -> &[PlatformGuide] {
        &self.guides
    }

    pub fn get(&self, key: &str) -> Option<&PlatformGuide> {
        self.guides.iter().find(|g| g.key == key)
    }

    /// Returns the guide for `key`, or the default guide when the key is
    /// missing or unknown.
    pub fn resolve(&self, key: Option<&str>) -> &PlatformGuide {
        key.and_then(|k| self.get(k))
            .or_else(|| self.get(DEFAULT_PLATFORM))
            .unwrap_or(&self.guides[0])
    }
}
