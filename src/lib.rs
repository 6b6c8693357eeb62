// src/lib.rs

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

pub mod divination;
pub mod pillars;
pub mod report;
pub mod scoring;
pub mod strokes;

// ---------------------------
// ## Enumerations
// ---------------------------

/// The ten heavenly stems of the sexagenary cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeavenlyStem {
    Jia = 0,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    pub fn from_index(index: usize) -> Option<HeavenlyStem> {
        match index {
            0 => Some(HeavenlyStem::Jia),
            1 => Some(HeavenlyStem::Yi),
            2 => Some(HeavenlyStem::Bing),
            3 => Some(HeavenlyStem::Ding),
            4 => Some(HeavenlyStem::Wu),
            5 => Some(HeavenlyStem::Ji),
            6 => Some(HeavenlyStem::Geng),
            7 => Some(HeavenlyStem::Xin),
            8 => Some(HeavenlyStem::Ren),
            9 => Some(HeavenlyStem::Gui),
            _ => None,
        }
    }

    /// Reduces an arbitrary offset into the ten-stem cycle.
    pub fn cyclic(offset: i64) -> HeavenlyStem {
        HeavenlyStem::from_index(offset.rem_euclid(10) as usize).unwrap()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = HeavenlyStem> {
        (0..10).map(HeavenlyStem::from_index).flatten()
    }

    /// Stems pair off into the five elements in cycle order.
    pub fn element(self) -> Element {
        match self {
            HeavenlyStem::Jia | HeavenlyStem::Yi => Element::Wood,
            HeavenlyStem::Bing | HeavenlyStem::Ding => Element::Fire,
            HeavenlyStem::Wu | HeavenlyStem::Ji => Element::Earth,
            HeavenlyStem::Geng | HeavenlyStem::Xin => Element::Metal,
            HeavenlyStem::Ren | HeavenlyStem::Gui => Element::Water,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            HeavenlyStem::Jia => '甲',
            HeavenlyStem::Yi => '乙',
            HeavenlyStem::Bing => '丙',
            HeavenlyStem::Ding => '丁',
            HeavenlyStem::Wu => '戊',
            HeavenlyStem::Ji => '己',
            HeavenlyStem::Geng => '庚',
            HeavenlyStem::Xin => '辛',
            HeavenlyStem::Ren => '壬',
            HeavenlyStem::Gui => '癸',
        }
    }

    /// Traditional temperament reading for the day-master stem.
    pub fn temperament(self) -> &'static str {
        match self {
            HeavenlyStem::Jia => "assertive and enterprising, a natural leader",
            HeavenlyStem::Yi => "gentle and artistic, courteous in manner",
            HeavenlyStem::Bing => "warm and outgoing, expressive by nature",
            HeavenlyStem::Ding => "quiet and quick-minded, meticulous in work",
            HeavenlyStem::Wu => "steady and practical, untiring under load",
            HeavenlyStem::Ji => "modest and tolerant, easy in company",
            HeavenlyStem::Geng => "resolute and forthright, decisive in action",
            HeavenlyStem::Xin => "adaptable and resourceful, quick to adjust",
            HeavenlyStem::Ren => "perceptive and imaginative, broad in vision",
            HeavenlyStem::Gui => "composed and reflective, deep in thought",
        }
    }
}

impl fmt::Display for HeavenlyStem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// The twelve earthly branches of the sexagenary cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EarthlyBranch {
    Zi = 0,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    pub fn from_index(index: usize) -> Option<EarthlyBranch> {
        match index {
            0 => Some(EarthlyBranch::Zi),
            1 => Some(EarthlyBranch::Chou),
            2 => Some(EarthlyBranch::Yin),
            3 => Some(EarthlyBranch::Mao),
            4 => Some(EarthlyBranch::Chen),
            5 => Some(EarthlyBranch::Si),
            6 => Some(EarthlyBranch::Wu),
            7 => Some(EarthlyBranch::Wei),
            8 => Some(EarthlyBranch::Shen),
            9 => Some(EarthlyBranch::You),
            10 => Some(EarthlyBranch::Xu),
            11 => Some(EarthlyBranch::Hai),
            _ => None,
        }
    }

    /// Reduces an arbitrary offset into the twelve-branch cycle.
    pub fn cyclic(offset: i64) -> EarthlyBranch {
        EarthlyBranch::from_index(offset.rem_euclid(12) as usize).unwrap()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = EarthlyBranch> {
        (0..12).map(EarthlyBranch::from_index).flatten()
    }

    pub fn element(self) -> Element {
        match self {
            EarthlyBranch::Zi | EarthlyBranch::Hai => Element::Water,
            EarthlyBranch::Yin | EarthlyBranch::Mao => Element::Wood,
            EarthlyBranch::Si | EarthlyBranch::Wu => Element::Fire,
            EarthlyBranch::Shen | EarthlyBranch::You => Element::Metal,
            EarthlyBranch::Chou
            | EarthlyBranch::Chen
            | EarthlyBranch::Wei
            | EarthlyBranch::Xu => Element::Earth,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            EarthlyBranch::Zi => '子',
            EarthlyBranch::Chou => '丑',
            EarthlyBranch::Yin => '寅',
            EarthlyBranch::Mao => '卯',
            EarthlyBranch::Chen => '辰',
            EarthlyBranch::Si => '巳',
            EarthlyBranch::Wu => '午',
            EarthlyBranch::Wei => '未',
            EarthlyBranch::Shen => '申',
            EarthlyBranch::You => '酉',
            EarthlyBranch::Xu => '戌',
            EarthlyBranch::Hai => '亥',
        }
    }

    /// The zodiac animal paired with this branch.
    pub fn animal(self) -> &'static str {
        match self {
            EarthlyBranch::Zi => "Rat",
            EarthlyBranch::Chou => "Ox",
            EarthlyBranch::Yin => "Tiger",
            EarthlyBranch::Mao => "Rabbit",
            EarthlyBranch::Chen => "Dragon",
            EarthlyBranch::Si => "Snake",
            EarthlyBranch::Wu => "Horse",
            EarthlyBranch::Wei => "Goat",
            EarthlyBranch::Shen => "Monkey",
            EarthlyBranch::You => "Rooster",
            EarthlyBranch::Xu => "Dog",
            EarthlyBranch::Hai => "Pig",
        }
    }

    /// The branch directly opposite in the twelve-cycle.
    pub fn opposite(self) -> EarthlyBranch {
        EarthlyBranch::cyclic(self.index() as i64 + 6)
    }

    /// The two-hour window governed by this branch. The Zi window wraps
    /// midnight, spanning 23:00 to 01:00.
    pub fn hour_window(self) -> (u32, u32) {
        match self {
            EarthlyBranch::Zi => (23, 1),
            other => {
                let start = other.index() as u32 * 2 - 1;
                (start, start + 2)
            }
        }
    }
}

impl fmt::Display for EarthlyBranch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// The five elements.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood = 0,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub fn from_index(index: usize) -> Option<Element> {
        match index {
            0 => Some(Element::Wood),
            1 => Some(Element::Fire),
            2 => Some(Element::Earth),
            3 => Some(Element::Metal),
            4 => Some(Element::Water),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = Element> {
        (0..5).map(Element::from_index).flatten()
    }

    /// The element this one produces in the generative cycle
    /// (wood → fire → earth → metal → water → wood).
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    pub fn character(self) -> &'static str {
        match self {
            Element::Wood => "benevolent, enterprising, inventive",
            Element::Fire => "courteous, bright, passionate",
            Element::Earth => "trustworthy, steady, generous",
            Element::Metal => "loyal, firm, decisive",
            Element::Water => "wise, adaptable, profound",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        };
        write!(f, "{}", name)
    }
}

/// How two elements relate under the generative cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementRelation {
    Generates,
    Same,
    Conflicts,
}

/// How two branches relate: a fixed harmony table, the opposite-position
/// clash, or nothing in particular.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchRelation {
    Harmony,
    Conflict,
    Neutral,
}

/// The fortune tier of a grid number under the 81-number tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LuckTier {
    GreatFortune,
    Fortune,
    HalfFortune,
    Inauspicious,
}

impl fmt::Display for LuckTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LuckTier::GreatFortune => "great fortune",
            LuckTier::Fortune => "fortune",
            LuckTier::HalfFortune => "half fortune",
            LuckTier::Inauspicious => "inauspicious",
        };
        write!(f, "{}", name)
    }
}

/// The five grids of name numerology.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridCategory {
    Heaven,
    Human,
    Earth,
    Outer,
    Total,
}

impl fmt::Display for GridCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GridCategory::Heaven => "heaven grid",
            GridCategory::Human => "human grid",
            GridCategory::Earth => "earth grid",
            GridCategory::Outer => "outer grid",
            GridCategory::Total => "total grid",
        };
        write!(f, "{}", name)
    }
}

/// Where a per-character stroke count came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeSource {
    Dictionary,
    Estimated,
}

/// The twelve western zodiac signs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        match index {
            0 => Some(ZodiacSign::Aries),
            1 => Some(ZodiacSign::Taurus),
            2 => Some(ZodiacSign::Gemini),
            3 => Some(ZodiacSign::Cancer),
            4 => Some(ZodiacSign::Leo),
            5 => Some(ZodiacSign::Virgo),
            6 => Some(ZodiacSign::Libra),
            7 => Some(ZodiacSign::Scorpio),
            8 => Some(ZodiacSign::Sagittarius),
            9 => Some(ZodiacSign::Capricorn),
            10 => Some(ZodiacSign::Aquarius),
            11 => Some(ZodiacSign::Pisces),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign from a calendar date.
    pub fn from_month_day(month: u32, day: u32) -> ZodiacSign {
        match (month, day) {
            (3, 21..) | (4, ..=19) => ZodiacSign::Aries,
            (4, _) | (5, ..=20) => ZodiacSign::Taurus,
            (5, _) | (6, ..=20) => ZodiacSign::Gemini,
            (6, _) | (7, ..=22) => ZodiacSign::Cancer,
            (7, _) | (8, ..=22) => ZodiacSign::Leo,
            (8, _) | (9, ..=22) => ZodiacSign::Virgo,
            (9, _) | (10, ..=22) => ZodiacSign::Libra,
            (10, _) | (11, ..=21) => ZodiacSign::Scorpio,
            (11, _) | (12, ..=21) => ZodiacSign::Sagittarius,
            (12, _) | (1, ..=19) => ZodiacSign::Capricorn,
            (1, _) | (2, ..=18) => ZodiacSign::Aquarius,
            _ => ZodiacSign::Pisces,
        }
    }

    /// Simplified rising sign: the sun sign advanced one place per
    /// two-hour interval of the birth hour.
    pub fn ascendant(month: u32, day: u32, hour: u32) -> ZodiacSign {
        let sun = ZodiacSign::from_month_day(month, day);
        ZodiacSign::from_index((sun.index() + hour as usize / 2) % 12).unwrap()
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

/// ABO blood types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    A,
    B,
    Ab,
    O,
}

impl BloodType {
    pub fn parse(text: &str) -> Option<BloodType> {
        match text.to_ascii_uppercase().as_str() {
            "A" => Some(BloodType::A),
            "B" => Some(BloodType::B),
            "AB" => Some(BloodType::Ab),
            "O" => Some(BloodType::O),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = BloodType> {
        [BloodType::A, BloodType::B, BloodType::Ab, BloodType::O]
            .iter()
            .copied()
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BloodType::A => "A",
            BloodType::B => "B",
            BloodType::Ab => "AB",
            BloodType::O => "O",
        };
        write!(f, "{}", name)
    }
}

/// Day-branch standing of the marriage palace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarriagePalace {
    Auspicious,
    Fair,
    Adverse,
}

// ---------------------------
// ## Structures
// ---------------------------

/// A validated birth date and hour. All derivations start here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthMoment {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl BirthMoment {
    /// Validates the calendar parts. Out-of-range parts surface as
    /// `InvalidCalendarInput`; nothing is silently corrected.
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Result<BirthMoment, MingliError> {
        if !(pillars::EPOCH_YEAR..=2100).contains(&year) {
            return Err(MingliError::InvalidCalendarInput(format!(
                "year {} outside supported range {}-2100",
                year,
                pillars::EPOCH_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(MingliError::InvalidCalendarInput(format!(
                "month {} outside 1-12",
                month
            )));
        }
        let month_days = pillars::days_in_month(year, month);
        if day < 1 || day > month_days {
            return Err(MingliError::InvalidCalendarInput(format!(
                "day {} outside 1-{} for {}-{:02}",
                day, month_days, year, month
            )));
        }
        if hour > 23 {
            return Err(MingliError::InvalidCalendarInput(format!(
                "hour {} outside 0-23",
                hour
            )));
        }
        Ok(BirthMoment {
            year,
            month,
            day,
            hour,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Derives the four pillars for this moment.
    pub fn four_pillars(&self) -> FourPillars {
        pillars::four_pillars(self)
    }

    pub fn generate_report(&self) -> ChartReport {
        ChartReport::calculate(self)
    }
}

impl fmt::Display for BirthMoment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:00",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// One stem/branch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
}

impl Pillar {
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Pillar {
        Pillar { stem, branch }
    }

    /// The stem element and the branch element, in that order.
    pub fn elements(&self) -> [Element; 2] {
        [self.stem.element(), self.branch.element()]
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// The year, month, day and hour pillars of one birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn all(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn branches(&self) -> [EarthlyBranch; 4] {
        [
            self.year.branch,
            self.month.branch,
            self.day.branch,
            self.hour.branch,
        ]
    }

    /// The day stem, the reference point for temperament and the hour stem.
    pub fn day_master(&self) -> HeavenlyStem {
        self.day.stem
    }

    pub fn tally_elements(&self) -> ElementTally {
        pillars::tally_elements(&self.all())
    }
}

impl fmt::Display for FourPillars {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Occurrence counts of the five elements over a set of pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ElementTally {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
}

impl ElementTally {
    pub fn add(&mut self, element: Element) {
        match element {
            Element::Wood => self.wood += 1,
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Metal => self.metal += 1,
            Element::Water => self.water += 1,
        }
    }

    pub fn count(&self, element: Element) -> u32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn total(&self) -> u32 {
        self.wood + self.fire + self.earth + self.metal + self.water
    }

    pub fn entries(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        Element::all().map(move |e| (e, self.count(e)))
    }

    pub fn dominant(&self) -> Element {
        self.entries()
            .max_by_key(|&(_, count)| count)
            .map(|(e, _)| e)
            .unwrap_or(Element::Wood)
    }

    pub fn weakest(&self) -> Element {
        self.entries()
            .min_by_key(|&(_, count)| count)
            .map(|(e, _)| e)
            .unwrap_or(Element::Wood)
    }

    /// A chart is balanced when no element dominates by more than two
    /// occurrences over the scarcest one.
    pub fn is_balanced(&self) -> bool {
        let max = self.entries().map(|(_, c)| c).max().unwrap_or(0);
        let min = self.entries().map(|(_, c)| c).min().unwrap_or(0);
        max - min <= 2
    }
}

/// One character of a name with its stroke count and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterStroke {
    pub character: char,
    pub strokes: u32,
    pub source: StrokeSource,
}

/// The five grid numbers of a name. `total` is the raw stroke sum; the
/// other four are the fixed partial combinations, not derivable from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NameGrid {
    pub heaven: u32,
    pub human: u32,
    pub earth: u32,
    pub outer: u32,
    pub total: u32,
}

impl NameGrid {
    pub fn value(&self, category: GridCategory) -> u32 {
        match category {
            GridCategory::Heaven => self.heaven,
            GridCategory::Human => self.human,
            GridCategory::Earth => self.earth,
            GridCategory::Outer => self.outer,
            GridCategory::Total => self.total,
        }
    }
}

/// A name together with its stroke breakdown and derived grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameChart {
    pub name: String,
    pub strokes: Vec<CharacterStroke>,
    pub grid: NameGrid,
}

impl NameChart {
    pub fn from_name(name: &str) -> Result<NameChart, MingliError> {
        strokes::name_chart(name)
    }
}

/// Why a category score came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridRationale {
    pub value_a: u32,
    pub value_b: u32,
    pub element_a: Element,
    pub element_b: Element,
    pub relation: ElementRelation,
    pub luck_a: LuckTier,
    pub luck_b: LuckTier,
}

/// One scored category of a pairwise name comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridScore {
    pub category: GridCategory,
    pub score: f64,
    pub weight: f64,
    pub rationale: GridRationale,
}

/// The full pairwise comparison: four weighted categories and the overall
/// score, all in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    pub categories: [GridScore; 4],
    pub overall: f64,
}

// ---------------------------
// ## Chart Report
// ---------------------------

/// Every structured result derived for one person. Formatting lives in
/// the `report` module; nothing here is prose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub moment: BirthMoment,
    pub pillars: FourPillars,
    pub tally: ElementTally,
    pub balanced: bool,
    pub branch_conflicts: Vec<(EarthlyBranch, EarthlyBranch)>,
    pub nayin: Element,
    pub animal: String,
    pub zodiac: ZodiacSign,
    pub ascendant: ZodiacSign,
    pub day_master: HeavenlyStem,
    pub marriage_palace: MarriagePalace,
}

impl ChartReport {
    pub fn calculate(moment: &BirthMoment) -> ChartReport {
        let pillars = moment.four_pillars();
        let tally = pillars.tally_elements();
        log::debug!("derived pillars {} for {}", pillars, moment);

        ChartReport {
            moment: *moment,
            tally,
            balanced: tally.is_balanced(),
            branch_conflicts: scoring::branch_conflicts(&pillars),
            nayin: pillars::nayin_element(pillars.year.stem),
            animal: pillars.year.branch.animal().to_string(),
            zodiac: ZodiacSign::from_month_day(moment.month(), moment.day()),
            ascendant: ZodiacSign::ascendant(moment.month(), moment.day(), moment.hour()),
            day_master: pillars.day_master(),
            marriage_palace: scoring::marriage_palace(pillars.day.branch),
            pillars,
        }
    }
}

// ---------------------------
// ## Error Handling
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MingliError {
    InvalidCalendarInput(String),
    NameTooShort(String),
}

impl fmt::Display for MingliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MingliError::InvalidCalendarInput(msg) => {
                write!(f, "Invalid Calendar Input: {}", msg)
            }
            MingliError::NameTooShort(msg) => write!(f, "Name Too Short: {}", msg),
        }
    }
}

impl Error for MingliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_cycle_and_elements() {
        assert_eq!(HeavenlyStem::cyclic(0), HeavenlyStem::Jia);
        assert_eq!(HeavenlyStem::cyclic(10), HeavenlyStem::Jia);
        assert_eq!(HeavenlyStem::cyclic(-1), HeavenlyStem::Gui);
        assert_eq!(HeavenlyStem::all().count(), 10);
        assert_eq!(HeavenlyStem::Jia.element(), Element::Wood);
        assert_eq!(HeavenlyStem::Gui.element(), Element::Water);
    }

    #[test]
    fn test_branch_cycle_and_opposites() {
        assert_eq!(EarthlyBranch::cyclic(12), EarthlyBranch::Zi);
        assert_eq!(EarthlyBranch::Zi.opposite(), EarthlyBranch::Wu);
        assert_eq!(EarthlyBranch::Wu.opposite(), EarthlyBranch::Zi);
        for branch in EarthlyBranch::all() {
            assert_eq!(branch.opposite().opposite(), branch);
        }
    }

    #[test]
    fn test_hour_windows_cover_the_day() {
        assert_eq!(EarthlyBranch::Zi.hour_window(), (23, 1));
        assert_eq!(EarthlyBranch::Chou.hour_window(), (1, 3));
        assert_eq!(EarthlyBranch::Hai.hour_window(), (21, 23));
    }

    #[test]
    fn test_birth_moment_validation() {
        assert!(BirthMoment::new(1990, 5, 15, 14).is_ok());
        assert!(matches!(
            BirthMoment::new(1990, 13, 1, 0),
            Err(MingliError::InvalidCalendarInput(_))
        ));
        assert!(matches!(
            BirthMoment::new(1990, 2, 29, 0),
            Err(MingliError::InvalidCalendarInput(_))
        ));
        // 2000 is a leap year under the 400-year rule.
        assert!(BirthMoment::new(2000, 2, 29, 0).is_ok());
        assert!(BirthMoment::new(1899, 1, 1, 0).is_err());
        assert!(BirthMoment::new(1990, 1, 1, 24).is_err());
    }

    #[test]
    fn test_zodiac_boundaries() {
        assert_eq!(ZodiacSign::from_month_day(3, 21), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_month_day(4, 19), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_month_day(4, 20), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_month_day(1, 19), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::from_month_day(1, 20), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::from_month_day(2, 19), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_month_day(12, 22), ZodiacSign::Capricorn);
    }

    #[test]
    fn test_ascendant_advances_with_hour() {
        let sun = ZodiacSign::from_month_day(6, 18);
        assert_eq!(ZodiacSign::ascendant(6, 18, 0), sun);
        assert_eq!(
            ZodiacSign::ascendant(6, 18, 7).index(),
            (sun.index() + 3) % 12
        );
    }

    #[test]
    fn test_tally_bookkeeping() {
        let mut tally = ElementTally::default();
        tally.add(Element::Wood);
        tally.add(Element::Wood);
        tally.add(Element::Water);
        assert_eq!(tally.count(Element::Wood), 2);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.dominant(), Element::Wood);
    }

    #[test]
    fn test_chart_report_is_deterministic() {
        let moment = BirthMoment::new(1991, 6, 18, 7).unwrap();
        assert_eq!(ChartReport::calculate(&moment), ChartReport::calculate(&moment));
    }
}
