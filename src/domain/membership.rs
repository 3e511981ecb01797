//! Canonical UN membership table
//!
//! The 193 UN member states as (ISO 3166-1 alpha-2, Japanese name) pairs,
//! following the Ministry of Foreign Affairs list
//! (https://www.mofa.go.jp/mofaj/files/000023536.pdf). This table decides
//! which scraped rows are emitted and what their names must be.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::country::IsoCode;

/// Number of UN member states
pub const UN_MEMBER_COUNT: usize = 193;

/// (ISO code, canonical localized name)
pub const UN_MEMBERS: [(&str, &str); UN_MEMBER_COUNT] = [
    ("AF", "アフガニスタン"),
    ("AL", "アルバニア"),
    ("DZ", "アルジェリア"),
    ("AD", "アンドラ"),
    ("AO", "アンゴラ"),
    ("AG", "アンティグア・バーブーダ"),
    ("AR", "アルゼンチン"),
    ("AM", "アルメニア"),
    ("AU", "オーストラリア"),
    ("AT", "オーストリア"),
    ("AZ", "アゼルバイジャン"),
    ("BS", "バハマ"),
    ("BH", "バーレーン"),
    ("BD", "バングラデシュ"),
    ("BB", "バルバドス"),
    ("BY", "ベラルーシ"),
    ("BE", "ベルギー"),
    ("BZ", "ベリーズ"),
    ("BJ", "ベナン"),
    ("BT", "ブータン"),
    ("BO", "ボリビア多民族国"),
    ("BA", "ボスニア・ヘルツェゴビナ"),
    ("BW", "ボツワナ"),
    ("BR", "ブラジル"),
    ("BN", "ブルネイ・ダルサラーム"),
    ("BG", "ブルガリア"),
    ("BF", "ブルキナファソ"),
    ("BI", "ブルンジ"),
    ("CV", "カーボベルデ"),
    ("KH", "カンボジア"),
    ("CM", "カメルーン"),
    ("CA", "カナダ"),
    ("CF", "中央アフリカ共和国"),
    ("TD", "チャド"),
    ("CL", "チリ"),
    ("CN", "中華人民共和国"),
    ("CO", "コロンビア"),
    ("KM", "コモロ"),
    ("CG", "コンゴ共和国"),
    ("CR", "コスタリカ"),
    ("CI", "コートジボワール"),
    ("HR", "クロアチア"),
    ("CU", "キューバ"),
    ("CY", "キプロス"),
    ("CZ", "チェコ"),
    ("KP", "朝鮮民主主義人民共和国"),
    ("CD", "コンゴ民主共和国"),
    ("DK", "デンマーク"),
    ("DJ", "ジブチ"),
    ("DM", "ドミニカ国"),
    ("DO", "ドミニカ共和国"),
    ("EC", "エクアドル"),
    ("EG", "エジプト"),
    ("SV", "エルサルバドル"),
    ("GQ", "赤道ギニア"),
    ("ER", "エリトリア"),
    ("EE", "エストニア"),
    ("SZ", "エスワティニ"),
    ("ET", "エチオピア"),
    ("FJ", "フィジー"),
    ("FI", "フィンランド"),
    ("FR", "フランス"),
    ("GA", "ガボン"),
    ("GM", "ガンビア"),
    ("GE", "ジョージア"),
    ("DE", "ドイツ"),
    ("GH", "ガーナ"),
    ("GR", "ギリシャ"),
    ("GD", "グレナダ"),
    ("GT", "グアテマラ"),
    ("GN", "ギニア"),
    ("GW", "ギニアビサウ"),
    ("GY", "ガイアナ"),
    ("HT", "ハイチ"),
    ("HN", "ホンジュラス"),
    ("HU", "ハンガリー"),
    ("IS", "アイスランド"),
    ("IN", "インド"),
    ("ID", "インドネシア"),
    ("IR", "イラン・イスラム共和国"),
    ("IQ", "イラク"),
    ("IE", "アイルランド"),
    ("IL", "イスラエル"),
    ("IT", "イタリア"),
    ("JM", "ジャマイカ"),
    ("JP", "日本"),
    ("JO", "ヨルダン"),
    ("KZ", "カザフスタン"),
    ("KE", "ケニア"),
    ("KI", "キリバス"),
    ("KW", "クウェート"),
    ("KG", "キルギス"),
    ("LA", "ラオス人民民主共和国"),
    ("LV", "ラトビア"),
    ("LB", "レバノン"),
    ("LS", "レソト"),
    ("LR", "リベリア"),
    ("LY", "リビア"),
    ("LI", "リヒテンシュタイン"),
    ("LT", "リトアニア"),
    ("LU", "ルクセンブルク"),
    ("MG", "マダガスカル"),
    ("MW", "マラウイ"),
    ("MY", "マレーシア"),
    ("MV", "モルディブ"),
    ("ML", "マリ"),
    ("MT", "マルタ"),
    ("MH", "マーシャル諸島"),
    ("MR", "モーリタニア"),
    ("MU", "モーリシャス"),
    ("MX", "メキシコ"),
    ("FM", "ミクロネシア連邦"),
    ("MC", "モナコ"),
    ("MN", "モンゴル"),
    ("ME", "モンテネグロ"),
    ("MA", "モロッコ"),
    ("MZ", "モザンビーク"),
    ("MM", "ミャンマー"),
    ("NA", "ナミビア"),
    ("NR", "ナウル"),
    ("NP", "ネパール"),
    ("NL", "オランダ"),
    ("NZ", "ニュージーランド"),
    ("NI", "ニカラグア"),
    ("NE", "ニジェール"),
    ("NG", "ナイジェリア"),
    ("MK", "北マケドニア"),
    ("NO", "ノルウェー"),
    ("OM", "オマーン"),
    ("PK", "パキスタン"),
    ("PW", "パラオ"),
    ("PA", "パナマ"),
    ("PG", "パプアニューギニア"),
    ("PY", "パラグアイ"),
    ("PE", "ペルー"),
    ("PH", "フィリピン"),
    ("PL", "ポーランド"),
    ("PT", "ポルトガル"),
    ("QA", "カタール"),
    ("KR", "大韓民国"),
    ("MD", "モルドバ共和国"),
    ("RO", "ルーマニア"),
    ("RU", "ロシア連邦"),
    ("RW", "ルワンダ"),
    ("KN", "セントクリストファー・ネイビス"),
    ("LC", "セントルシア"),
    ("VC", "セントビンセント・グレナディーン"),
    ("WS", "サモア"),
    ("SM", "サンマリノ"),
    ("ST", "サントメ・プリンシペ"),
    ("SA", "サウジアラビア"),
    ("SN", "セネガル"),
    ("RS", "セルビア"),
    ("SC", "セーシェル"),
    ("SL", "シエラレオネ"),
    ("SG", "シンガポール"),
    ("SK", "スロバキア"),
    ("SI", "スロベニア"),
    ("SB", "ソロモン諸島"),
    ("SO", "ソマリア"),
    ("ZA", "南アフリカ"),
    ("SS", "南スーダン"),
    ("ES", "スペイン"),
    ("LK", "スリランカ"),
    ("SD", "スーダン"),
    ("SR", "スリナム"),
    ("SE", "スウェーデン"),
    ("CH", "スイス"),
    ("SY", "シリア・アラブ共和国"),
    ("TJ", "タジキスタン"),
    ("TH", "タイ"),
    ("TL", "東ティモール"),
    ("TG", "トーゴ"),
    ("TO", "トンガ"),
    ("TT", "トリニダード・トバゴ"),
    ("TN", "チュニジア"),
    ("TR", "トルコ"),
    ("TM", "トルクメニスタン"),
    ("TV", "ツバル"),
    ("UG", "ウガンダ"),
    ("UA", "ウクライナ"),
    ("AE", "アラブ首長国連邦"),
    ("GB", "イギリス"),
    ("TZ", "タンザニア"),
    ("US", "アメリカ合衆国"),
    ("UY", "ウルグアイ"),
    ("UZ", "ウズベキスタン"),
    ("VU", "バヌアツ"),
    ("VE", "ベネズエラ・ボリバル共和国"),
    ("VN", "ベトナム"),
    ("YE", "イエメン"),
    ("ZM", "ザンビア"),
    ("ZW", "ジンバブエ"),
];

static MEMBERSHIP: Lazy<CanonicalMembership> = Lazy::new(|| CanonicalMembership::from_pairs(&UN_MEMBERS));

/// Read-only lookup over the canonical member table
#[derive(Debug)]
pub struct CanonicalMembership {
    names: HashMap<&'static str, &'static str>,
}

impl CanonicalMembership {
    /// Process-wide instance built from [`UN_MEMBERS`]
    pub fn global() -> &'static CanonicalMembership {
        &MEMBERSHIP
    }

    fn from_pairs(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            names: pairs.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, iso: &IsoCode) -> bool {
        self.names.contains_key(iso.as_str())
    }

    /// Canonical name for a member code, `None` for non-members
    pub fn canonical_name(&self, iso: &IsoCode) -> Option<&'static str> {
        self.names.get(iso.as_str()).copied()
    }
}
