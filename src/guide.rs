//! Static renting advice and case-study links shown by `rentguard guide`.

use crate::models::Reference;

pub struct GuideEntry {
    pub title: &'static str,
    pub content: &'static str,
}

pub struct GuideSection {
    pub id: &'static str,
    pub title: &'static str,
    pub entries: &'static [GuideEntry],
}

pub const GUIDE_SECTIONS: &[GuideSection] = &[
    GuideSection {
        id: "contract",
        title: "合同条款注意事项",
        entries: &[
            GuideEntry {
                title: "租金及支付方式",
                content: "写明租金金额、支付周期和方式。尽量通过银行转账支付并保留凭证，避免现金交易。",
            },
            GuideEntry {
                title: "押金条款",
                content: "押金一般不超过两个月租金，合同中应写清退还条件和退还期限。",
            },
            GuideEntry {
                title: "违约责任",
                content: "逐条核对提前退租、逾期付款等情形下双方各自承担的责任。",
            },
            GuideEntry {
                title: "房屋维修责任",
                content: "日常小修通常由租客负责，主体结构和设施大修应由房东承担，需在合同中写明。",
            },
            GuideEntry {
                title: "转租条款",
                content: "确认是否允许转租，以及转租需要满足的条件和手续。",
            },
        ],
    },
    GuideSection {
        id: "inspection",
        title: "看房检查清单",
        entries: &[
            GuideEntry {
                title: "房屋结构",
                content: "查看墙面有无裂缝和渗水痕迹，门窗是否完好，地面是否平整。",
            },
            GuideEntry {
                title: "水电设施",
                content: "逐一试用水龙头、马桶、淋浴、开关和插座。",
            },
            GuideEntry {
                title: "家电设备",
                content: "确认冰箱、洗衣机、空调、热水器等能正常运行。",
            },
            GuideEntry {
                title: "安全隐患",
                content: "检查燃气管道、电路和门锁等安全设施。",
            },
            GuideEntry {
                title: "周边环境",
                content: "了解交通、购物、医疗配套，以及噪音和采光情况。",
            },
        ],
    },
    GuideSection {
        id: "questions",
        title: "必问房东问题",
        entries: &[
            GuideEntry {
                title: "房屋产权",
                content: "核实房东身份和产权，查看房产证与身份证原件。",
            },
            GuideEntry {
                title: "费用明细",
                content: "问清水、电、燃气、物业、网络等费用由谁承担。",
            },
            GuideEntry {
                title: "维修责任",
                content: "明确各类维修的责任方和响应时间。",
            },
            GuideEntry {
                title: "访客留宿",
                content: "了解是否允许访客留宿及相关规定。",
            },
            GuideEntry {
                title: "宠物政策",
                content: "确认能否养宠物，以及是否需要额外押金或费用。",
            },
        ],
    },
    GuideSection {
        id: "deposit",
        title: "押金退还要点",
        entries: &[
            GuideEntry {
                title: "退房检查",
                content: "与房东一起验房，拍照留存房屋现状。",
            },
            GuideEntry {
                title: "费用结算",
                content: "结清水电、物业、网络等全部费用。",
            },
            GuideEntry {
                title: "物品归还",
                content: "归还全部钥匙和门禁卡，当面清点数量。",
            },
            GuideEntry {
                title: "押金凭证",
                content: "要求房东出具押金退还凭证，写明退还时间和金额。",
            },
            GuideEntry {
                title: "争议处理",
                content: "发生争议时保留证据，必要时寻求法律援助。",
            },
        ],
    },
];

/// Topics with curated case-study searches.
pub const CASE_TOPICS: [&str; 6] = [
    "deposit",
    "contract",
    "violation",
    "maintenance",
    "sublet",
    "safety",
];

const CASE_SEARCH_BASE: &str = "https://www.xiaohongshu.com/explore/";

fn case_titles(topic: &str) -> &'static [&'static str] {
    match topic {
        "deposit" => &["租房押金纠纷案例", "押金退还注意事项", "租房押金被扣怎么办", "押金退还时间规定"],
        "contract" => &["租房合同避坑指南", "合同条款分析", "租房合同注意事项", "合同陷阱识别"],
        "violation" => &["违约金纠纷案例", "提前退租经验分享", "违约金过高怎么办", "提前退租违约金"],
        "maintenance" => &["房屋维修责任划分", "维修费用承担", "房屋损坏赔偿", "维修不及时投诉"],
        "sublet" => &["转租规定和限制", "转租流程和注意事项", "转租风险提示", "转租合同模板"],
        "safety" => &["房屋安全检查", "租房安全隐患", "燃气安全使用", "电路安全检查"],
        _ => &[],
    }
}

/// Case-study links for a topic; unknown topics yield none.
pub fn case_references(topic: &str) -> Vec<Reference> {
    case_titles(topic)
        .iter()
        .map(|title| Reference::new(*title, format!("{}{}", CASE_SEARCH_BASE, title)))
        .collect()
}

pub fn find_section(id: &str) -> Option<&'static GuideSection> {
    GUIDE_SECTIONS
        .iter()
        .find(|section| section.id.eq_ignore_ascii_case(id.trim()))
}

/// Plain-text rendering of one section followed by its case links, if any.
pub fn render_section(section: &GuideSection) -> String {
    let mut output = format!("== {} ==\n", section.title);
    for entry in section.entries {
        output.push_str(&format!("• {}\n  {}\n", entry.title, entry.content));
    }

    let cases = case_references(section.id);
    if !cases.is_empty() {
        output.push_str("\n相关案例:\n");
        for case in cases {
            output.push_str(&format!("  - {} ({})\n", case.title, case.url));
        }
    }

    output
}

pub fn render_all() -> String {
    GUIDE_SECTIONS
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n")
}
