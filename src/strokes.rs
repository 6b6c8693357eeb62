//! Kangxi stroke counts and five-grid derivation.
//!
//! The dictionary covers the common surnames and given-name characters of
//! the source tables. Characters outside it never fail a lookup: CJK
//! codepoints get a deterministic estimate from their position in the
//! block, anything else counts as a single stroke, and every count
//! records where it came from.

use crate::{CharacterStroke, MingliError, NameChart, NameGrid, StrokeSource};

/// Kangxi stroke count for a dictionary character.
fn dictionary_stroke(character: char) -> Option<u32> {
    match character {
        '丁' | '二' | '十' | '七' | '人' | '入' | '八' | '九' | '力' => Some(2),
        '于' | '三' | '上' | '下' | '久' | '么' | '也' | '女' | '子' | '小' | '山' | '川' | '之' | '丸' |
        '才' | '千' | '士' | '夕' => Some(3),
        '王' | '方' | '孔' | '尹' | '文' | '牛' | '丹' | '不' | '中' | '五' | '井' | '仁' | '什' | '今' |
        '介' | '仍' | '元' | '允' | '內' | '六' | '分' | '化' | '午' | '升' | '友' | '太' | '天' | '夫' |
        '少' | '尺' | '屯' | '巴' | '引' | '心' | '戈' | '手' | '支' | '斗' | '日' | '月' | '木' | '比' |
        '毛' | '氏' | '水' | '火' | '父' | '牙' => Some(4),
        '田' | '石' | '白' | '史' | '平' | '世' | '丘' | '主' | '令' | '以' | '仕' | '他' | '付' | '仙' |
        '代' | '兄' | '充' | '冬' | '出' | '加' | '功' | '包' | '北' | '半' | '古' | '可' | '另' | '只' |
        '召' | '右' | '台' | '司' | '四' | '外' | '央' | '失' | '奴' | '它' | '尼' | '左' | '市' | '布' |
        '必' | '打' | '本' | '正' | '民' | '永' | '生' | '用' | '由' | '立' => Some(5),
        '朱' | '任' | '向' | '年' | '交' | '伊' | '休' | '件' | '仰' | '伏' | '先' | '光' | '全' | '共' |
        '再' | '冰' | '列' | '刑' | '划' | '匠' | '印' | '危' | '后' | '吉' | '同' | '名' | '因' | '地' |
        '在' | '多' | '好' | '如' | '守' | '安' | '州' | '式' | '成' | '托' | '收' | '早' | '旭' | '曲' |
        '有' | '次' | '汗' | '汝' | '池' | '竹' | '米' | '羊' | '老' | '考' | '而' | '耳' | '肉' | '自' |
        '至' | '色' | '行' | '衣' | '西' => Some(6),
        '李' | '吳' | '何' | '宋' | '余' | '呂' | '杜' | '江' | '秀' | '妍' | '君' | '伸' | '佃' | '但' |
        '位' | '伴' | '佛' | '估' | '你' | '作' | '伯' | '伶' | '住' | '佐' | '佑' | '免' | '兌' | '克' |
        '別' | '判' | '利' | '助' | '努' | '劫' | '即' | '吟' | '吾' | '告' | '吹' | '吻' | '呈' | '妙' |
        '妖' | '妊' | '妃' | '妥' | '孝' | '完' | '宏' | '尾' | '局' | '希' | '序' | '廷' | '弄' | '形' |
        '彤' | '志' | '忌' | '忍' | '戒' | '扶' | '找' | '技' | '抄' | '把' | '抗' | '折' | '改' | '杏' |
        '材' | '村' | '束' | '步' | '每' | '求' | '沐' | '沙' | '汰' | '沖' | '沒' | '沃' | '私' | '究' |
        '系' | '肖' | '良' | '見' | '角' | '言' | '谷' | '豆' | '赤' | '走' | '足' | '身' | '車' | '辛' |
        '里' | '防' | '邦' | '那' | '酉' => Some(7),
        '周' | '林' | '沈' | '汪' | '金' | '孟' | '易' | '武' | '明' | '佳' | '青' | '使' | '來' | '例' |
        '供' | '依' | '侍' | '佩' | '協' | '咐' | '和' | '命' | '坤' | '坡' | '夜' | '奇' | '奈' | '奉' |
        '妹' | '始' | '姊' | '姍' | '宙' | '定' | '宜' | '宗' | '官' | '尚' | '屈' | '岸' | '岡' | '帖' |
        '幸' | '店' | '府' | '底' | '延' | '弦' | '忠' | '念' | '怖' | '性' | '怪' | '承' | '抱' | '拆' |
        '拉' | '拍' | '拓' | '招' | '放' | '昌' | '昏' | '昔' | '昆' | '服' | '杭' | '枝' | '果' | '松' |
        '板' | '析' | '枚' | '欣' | '沿' | '泉' | '泊' | '法' | '波' | '況' | '油' | '沼' | '炎' | '炊' |
        '版' | '物' | '盲' | '直' | '知' | '社' | '空' | '者' | '肯' | '舍' | '長' | '門' | '雨' => Some(8),
        '姜' | '姚' | '侯' | '段' | '洪' | '施' | '軍' | '勇' | '飛' | '紅' | '秋' | '姣' | '怡' | '眉' |
        '星' | '映' | '春' | '昧' | '昭' | '是' | '昨' | '注' | '泥' | '河' | '治' | '亮' | '信' | '保' |
        '促' | '俊' | '俐' | '係' | '冠' | '則' | '勁' | '南' | '厚' | '叛' | '咨' | '品' | '哈' | '型' |
        '城' | '奏' | '姿' | '威' | '娃' | '客' | '宣' | '室' | '屋' | '巷' | '帝' | '幽' | '度' | '建' |
        '弈' | '很' | '律' | '後' | '思' | '怒' | '急' | '怨' | '恆' | '恤' | '恰' | '恢' | '拜' | '拯' |
        '持' | '括' | '指' | '政' | '故' | '柏' | '某' | '柳' | '柔' | '查' | '柱' | '柿' | '栓' | '毒' |
        '泡' | '泳' | '洋' | '洗' | '津' | '活' | '洲' | '派' | '流' | '為' | '炫' | '炭' | '界' | '皆' |
        '相' | '省' | '看' | '科' | '穿' | '約' | '美' | '耐' | '背' | '致' | '茂' | '計' | '訂' | '貞' |
        '迫' | '述' | '重' | '食' | '首' | '香' => Some(9),
        '徐' | '孫' | '馬' | '高' | '唐' | '袁' | '夏' | '秦' | '芳' | '娜' | '娟' | '玲' | '剛' | '素' |
        '真' | '珊' | '倩' | '草' | '倍' | '倒' | '候' | '借' | '值' | '倫' | '俱' | '修' | '個' | '們' |
        '凍' | '原' | '員' | '圃' | '埋' | '姬' | '娘' | '娥' | '容' | '家' | '宴' | '宮' | '害' | '宰' |
        '展' | '峰' | '島' | '差' | '師' | '庫' | '弱' | '徑' | '恩' | '恭' | '息' | '恕' | '拳' | '挺' |
        '振' | '效' | '料' | '旅' | '時' | '晉' | '書' | '朗' | '核' | '根' | '格' | '栽' | '桂' | '桃' |
        '案' | '桐' | '殊' | '氣' | '浙' | '浚' | '浪' | '浮' | '海' | '消' | '涉' | '班' | '琉' | '留' |
        '畝' | '畜' | '病' | '益' | '破' | '神' | '祖' | '秘' | '租' | '站' | '笑' | '純' | '紙' | '納' |
        '紐' | '級' | '缺' | '翁' | '耕' | '耗' | '胸' | '能' | '般' | '芬' | '芝' | '茵' | '茶' | '荒' |
        '記' | '討' | '訓' | '財' | '貢' | '起' | '送' | '鬼' | '骨' => Some(10),
        '張' | '胡' | '郭' | '梁' | '曹' | '許' | '范' | '崔' | '常' | '強' | '偉' | '敏' | '英' | '雪' |
        '梅' | '婉' | '紈' | '苑' | '婕' | '健' | '偶' | '偵' | '側' | '動' | '務' | '區' | '參' | '商' |
        '國' | '堅' | '堂' | '婦' | '婚' | '專' | '將' | '崇' | '康' | '彩' | '得' | '從' | '悉' | '情' |
        '惜' | '惟' | '悠' | '您' | '授' | '掉' | '排' | '探' | '推' | '接' | '控' | '措' | '敎' | '敗' |
        '啟' | '救' | '教' | '族' | '晚' | '晨' | '條' | '梨' | '械' | '欲' | '殺' | '淚' | '淡' | '深' |
        '混' | '清' | '淨' | '涼' | '淺' | '添' | '理' | '球' | '產' | '異' | '眼' | '眾' | '票' | '第' |
        '符' | '紳' | '細' | '終' | '組' | '累' | '處' | '蛋' | '術' | '街' | '袖' | '被' | '規' | '設' |
        '貨' | '責' | '速' | '造' | '連' | '部' | '陪' | '雀' | '頂' | '魚' | '鳥' | '鹿' => Some(11),
        '黃' | '馮' | '曾' | '程' | '彭' | '傅' | '邵' | '賀' | '湯' | '喬' | '傑' | '超' | '雲' | '茜' |
        '婷' | '雁' | '嵐' | '結' | '統' | '絕' | '傢' | '傲' | '債' | '傷' | '勞' | '勝' | '博' | '喜' |
        '單' | '報' | '場' | '堯' | '壺' | '媒' | '富' | '寒' | '尊' | '就' | '幅' | '幾' | '廁' | '廈' |
        '廚' | '復' | '循' | '悲' | '惠' | '惡' | '惱' | '愁' | '愈' | '揮' | '換' | '散' | '敢' | '景' |
        '最' | '期' | '朝' | '棒' | '森' | '棉' | '棋' | '植' | '椅' | '殘' | '渡' | '測' | '港' | '游' |
        '湖' | '溫' | '湘' | '無' | '焦' | '然' | '煙' | '煮' | '童' | '筆' | '等' | '答' | '筋' | '策' |
        '紫' | '絲' | '絮' | '絡' | '給' | '裁' | '費' | '越' | '跑' | '距' | '辜' | '逛' | '週' | '道' |
        '達' | '項' | '順' | '須' | '飯' | '飲' | '黑' => Some(12),
        '楊' | '雷' | '賈' | '琳' | '愛' | '莎' | '荷' | '琴' | '傳' | '嗎' | '媽' | '想' | '感' | '業' |
        '極' | '準' | '溪' | '獅' | '當' | '義' | '裕' | '解' | '詩' | '試' | '話' | '該' | '詳' | '路' |
        '跟' | '農' | '運' | '過' | '電' | '零' | '預' | '飽' | '鼓' => Some(13),
        '趙' | '華' | '萍' | '嘉' | '榮' | '菁' | '菊' | '齊' | '團' | '圖' | '實' | '對' | '歌' | '演' |
        '漢' | '滿' | '源' | '滴' | '種' | '精' | '綠' | '網' | '舞' | '蒙' | '認' | '語' | '說' | '誤' |
        '銀' | '銅' | '需' | '領' | '鳴' => Some(14),
        '劉' | '董' | '葉' | '廖' | '萬' | '黎' | '輝' | '磊' | '嫻' | '瑤' | '嬋' | '儀' | '慧' | '德' |
        '影' | '慶' | '樂' | '歐' | '潔' | '璋' | '線' | '蝶' | '論' | '誰' | '課' | '賢' | '質' | '輪' |
        '適' | '震' | '霜' | '養' | '餘' => Some(15),
        '陳' | '潘' | '盧' | '陸' | '龍' | '錢' | '閻' | '靜' | '燕' | '錦' | '瑾' | '穎' | '蓓' | '蓉' |
        '夢' | '學' | '樹' | '橋' | '機' | '歷' | '燈' | '獨' | '積' | '穆' | '築' | '興' | '融' | '親' |
        '諾' | '霍' => Some(16),
        '謝' | '韓' | '蔡' | '蔣' | '霞' | '蓮' | '環' | '黛' | '臨' | '營' | '縣' | '聯' | '聲' | '膽' |
        '購' | '賽' | '雖' => Some(17),
        '魏' | '戴' | '濤' | '蕊' | '顏' | '題' => Some(18),
        '鄭' | '鄧' | '蕭' | '麗' | '鵬' | '薇' | '願' => Some(19),
        '羅' | '鐘' | '嚴' => Some(20),
        '顧' | '露' => Some(21),
        '蘇' | '龔' => Some(22),
        '麟' => Some(23),
        '鑫' => Some(24),
        _ => None,
    }
}

const CJK_FIRST: u32 = 0x4E00;
const CJK_LAST: u32 = 0x9FFF;

/// Deterministic estimate for a character missing from the dictionary.
/// Position in the CJK block seeds a 1-30 base; later codepoints lean
/// toward more strokes. Non-CJK characters count one stroke.
fn estimate_stroke(character: char) -> u32 {
    let code_point = character as u32;
    if (CJK_FIRST..=CJK_LAST).contains(&code_point) {
        let offset = code_point - CJK_FIRST;
        let base = offset % 30 + 1;
        let complexity = offset / 5000;
        (base + complexity * 3).min(30)
    } else {
        1
    }
}

/// Stroke count for any character, with its provenance.
pub fn stroke_count(character: char) -> (u32, StrokeSource) {
    match dictionary_stroke(character) {
        Some(strokes) => (strokes, StrokeSource::Dictionary),
        None => {
            log::debug!("estimating strokes for '{}'", character);
            (estimate_stroke(character), StrokeSource::Estimated)
        }
    }
}

/// Derives the five grids of a name. Two-character names use the short
/// combination rules with the outer grid pinned at 2; longer names fold
/// the remaining characters into the earth and outer grids. Fewer than
/// two characters is a typed failure.
pub fn name_chart(name: &str) -> Result<NameChart, MingliError> {
    let strokes: Vec<CharacterStroke> = name
        .chars()
        .map(|character| {
            let (count, source) = stroke_count(character);
            CharacterStroke {
                character,
                strokes: count,
                source,
            }
        })
        .collect();

    if strokes.len() < 2 {
        return Err(MingliError::NameTooShort(format!(
            "'{}' has {} character(s), need at least 2",
            name,
            strokes.len()
        )));
    }

    let counts: Vec<u32> = strokes.iter().map(|s| s.strokes).collect();
    let total: u32 = counts.iter().sum();
    let heaven = counts[0] + 1;
    let human = counts[0] + counts[1];
    let grid = if counts.len() == 2 {
        NameGrid {
            heaven,
            human,
            earth: counts[1] + 1,
            outer: 2,
            total,
        }
    } else {
        NameGrid {
            heaven,
            human,
            earth: counts[1..].iter().sum(),
            outer: total - human + 1,
            total,
        }
    };

    Ok(NameChart {
        name: name.to_string(),
        strokes,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_hits() {
        assert_eq!(stroke_count('王'), (4, StrokeSource::Dictionary));
        assert_eq!(stroke_count('李'), (7, StrokeSource::Dictionary));
        assert_eq!(stroke_count('明'), (8, StrokeSource::Dictionary));
        assert_eq!(stroke_count('麗'), (19, StrokeSource::Dictionary));
    }

    #[test]
    fn test_estimator_is_deterministic_and_bounded() {
        // U+9FFF sits past the dictionary; the estimate must be stable.
        let rare = '\u{9FFF}';
        let (first, source) = stroke_count(rare);
        assert_eq!(source, StrokeSource::Estimated);
        assert_eq!(stroke_count(rare).0, first);
        assert!((1..=30).contains(&first));
        // First codepoint of the block: offset 0 -> one stroke.
        assert_eq!(estimate_stroke('\u{4E00}'), 1);
    }

    #[test]
    fn test_non_cjk_counts_one() {
        assert_eq!(estimate_stroke('A'), 1);
        assert_eq!(estimate_stroke('9'), 1);
        assert_eq!(estimate_stroke('♈'), 1);
    }

    #[test]
    fn test_two_character_grid_formulas() {
        // 王 = 4, 明 = 8.
        let chart = name_chart("王明").unwrap();
        assert_eq!(chart.grid.heaven, 5);
        assert_eq!(chart.grid.earth, 9);
        assert_eq!(chart.grid.human, 12);
        assert_eq!(chart.grid.total, 12);
        assert_eq!(chart.grid.outer, 2);
    }

    #[test]
    fn test_three_character_grid_formulas() {
        // 王 = 4, 小 = 3, 明 = 8.
        let chart = name_chart("王小明").unwrap();
        assert_eq!(chart.grid.heaven, 5);
        assert_eq!(chart.grid.human, 7);
        assert_eq!(chart.grid.earth, 11);
        assert_eq!(chart.grid.total, 15);
        // outer = total - human + 1.
        assert_eq!(chart.grid.outer, 9);
    }

    #[test]
    fn test_total_is_raw_sum_not_derived() {
        let chart = name_chart("王小明").unwrap();
        let g = chart.grid;
        // The grids are partial sums, not a partition of the total.
        assert_ne!(g.heaven + g.human + g.earth + g.outer, g.total);
    }

    #[test]
    fn test_name_too_short() {
        assert!(matches!(
            name_chart("王"),
            Err(MingliError::NameTooShort(_))
        ));
        assert!(matches!(name_chart(""), Err(MingliError::NameTooShort(_))));
    }

    #[test]
    fn test_mixed_provenance_recorded() {
        let chart = name_chart("王\u{9FFF}").unwrap();
        assert_eq!(chart.strokes[0].source, StrokeSource::Dictionary);
        assert_eq!(chart.strokes[1].source, StrokeSource::Estimated);
    }
}
