use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::Language;

/// The ten archetypes. Declaration order is the reference table order, which
/// is also the tie-break order when ranking equal percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchetypeId {
    Rostam,
    Simorgh,
    Gordafarid,
    Kaveh,
    Roudabeh,
    Jamshid,
    Arash,
    Zahhak,
    Fereydun,
    Manizheh,
}

impl ArchetypeId {
    pub const ALL: [ArchetypeId; 10] = [
        ArchetypeId::Rostam,
        ArchetypeId::Simorgh,
        ArchetypeId::Gordafarid,
        ArchetypeId::Kaveh,
        ArchetypeId::Roudabeh,
        ArchetypeId::Jamshid,
        ArchetypeId::Arash,
        ArchetypeId::Zahhak,
        ArchetypeId::Fereydun,
        ArchetypeId::Manizheh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchetypeId::Rostam => "rostam",
            ArchetypeId::Simorgh => "simorgh",
            ArchetypeId::Gordafarid => "gordafarid",
            ArchetypeId::Kaveh => "kaveh",
            ArchetypeId::Roudabeh => "roudabeh",
            ArchetypeId::Jamshid => "jamshid",
            ArchetypeId::Arash => "arash",
            ArchetypeId::Zahhak => "zahhak",
            ArchetypeId::Fereydun => "fereydun",
            ArchetypeId::Manizheh => "manizheh",
        }
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchetypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ArchetypeId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| format!("unknown archetype '{}'", s))
    }
}

/// Bilingual display metadata for one archetype. Not used by scoring.
#[derive(Debug)]
pub struct Archetype {
    pub id: ArchetypeId,
    name: (&'static str, &'static str),
    title: (&'static str, &'static str),
    intelligence: (&'static str, &'static str),
    shadow: (&'static str, &'static str),
    key_traits: ([&'static str; 3], [&'static str; 3]),
    description: (&'static str, &'static str),
    /// Hex color, e.g. "#DC2626"
    pub color: &'static str,
}

impl Archetype {
    pub fn name(&self, lang: Language) -> &'static str {
        lang.pick(self.name.0, self.name.1)
    }

    pub fn title(&self, lang: Language) -> &'static str {
        lang.pick(self.title.0, self.title.1)
    }

    pub fn intelligence(&self, lang: Language) -> &'static str {
        lang.pick(self.intelligence.0, self.intelligence.1)
    }

    pub fn shadow(&self, lang: Language) -> &'static str {
        lang.pick(self.shadow.0, self.shadow.1)
    }

    pub fn key_traits(&self, lang: Language) -> &[&'static str; 3] {
        match lang {
            Language::En => &self.key_traits.0,
            Language::Fa => &self.key_traits.1,
        }
    }

    pub fn description(&self, lang: Language) -> &'static str {
        lang.pick(self.description.0, self.description.1)
    }

    /// Parse the hex color into RGB components, falling back to white
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(255)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

/// Look up the reference record for an archetype
pub fn archetype(id: ArchetypeId) -> &'static Archetype {
    // ARCHETYPES is declared in ArchetypeId order
    &ARCHETYPES[id as usize]
}

pub static ARCHETYPES: [Archetype; 10] = [
    Archetype {
        id: ArchetypeId::Rostam,
        name: ("Rostam", "رستم"),
        title: ("Strategic Warrior", "جنگجوی استراتژیست"),
        intelligence: ("Bodily-Kinesthetic", "هوش بدنی-جنبشی"),
        shadow: ("Pride", "غرور"),
        key_traits: (
            ["Power", "Strategy", "Decisive Action"],
            ["قدرت", "استراتژی", "عمل قاطع"],
        ),
        description: (
            "Natural leaders who take charge in crisis situations, combining physical strength with strategic thinking.",
            "رهبران طبیعی که در شرایط بحرانی رهبری را به دست می‌گیرند و قدرت فیزیکی را با تفکر استراتژیک ترکیب می‌کنند.",
        ),
        color: "#DC2626",
    },
    Archetype {
        id: ArchetypeId::Simorgh,
        name: ("Simorgh", "سیمرغ"),
        title: ("Wise Sage", "دانای خردمند"),
        intelligence: ("Intrapersonal", "هوش درون‌فردی"),
        shadow: ("Isolation", "انزوا"),
        key_traits: (
            ["Wisdom", "Mystery", "Intuition"],
            ["خرد", "رمز و راز", "شهود"],
        ),
        description: (
            "Deep thinkers who prefer solitude for reflection and possess profound inner wisdom.",
            "متفکران عمیقی که تنهایی را برای تأمل ترجیح می‌دهند و دارای خرد درونی عمیقی هستند.",
        ),
        color: "#7C3AED",
    },
    Archetype {
        id: ArchetypeId::Gordafarid,
        name: ("Gordafarid", "گردآفرید"),
        title: ("Innovative Defender", "مدافع مبتکر"),
        intelligence: ("Interpersonal", "هوش میان‌فردی"),
        shadow: ("Excessive Self-sacrifice", "فداکاری افراطی"),
        key_traits: (
            ["Protection", "Empathy", "Sacrifice"],
            ["حمایت", "همدلی", "ایثار"],
        ),
        description: (
            "Natural protectors who prioritize others' needs and excel at understanding emotions.",
            "محافظان طبیعی که نیازهای دیگران را در اولویت قرار می‌دهند و در درک احساسات مهارت دارند.",
        ),
        color: "#059669",
    },
    Archetype {
        id: ArchetypeId::Kaveh,
        name: ("Kaveh", "کاوه آهنگر"),
        title: ("Revolutionary Leader", "رهبر انقلابی"),
        intelligence: ("Linguistic-Verbal", "هوش کلامی-زبانی"),
        shadow: ("Distrust", "بی‌اعتمادی"),
        key_traits: (
            ["Rebellion", "Leadership", "Justice"],
            ["شورش", "رهبری", "عدالت"],
        ),
        description: (
            "Charismatic speakers who inspire others toward common goals and fight for justice.",
            "سخنوران کاریزماتیکی که دیگران را برای اهداف مشترک الهام می‌بخشند و برای عدالت می‌جنگند.",
        ),
        color: "#EA580C",
    },
    Archetype {
        id: ArchetypeId::Roudabeh,
        name: ("Roudabeh", "رودابه"),
        title: ("Artist Lover", "عاشق هنرمند"),
        intelligence: ("Musical-Rhythmic", "هوش موسیقیایی-ریتمیک"),
        shadow: ("Emotional Instability", "بی‌ثباتی عاطفی"),
        key_traits: (
            ["Art", "Passion", "Unbounded Emotions"],
            ["هنر", "شور", "احساسات بی‌قید"],
        ),
        description: (
            "Deeply emotional beings whose moods are influenced by art, music, and beauty.",
            "موجودات عمیقاً احساسی که حال و هوایشان تحت تأثیر هنر، موسیقی و زیبایی است.",
        ),
        color: "#E11D48",
    },
    Archetype {
        id: ArchetypeId::Jamshid,
        name: ("Jamshid", "جمشید"),
        title: ("Builder King", "پادشاه سازنده"),
        intelligence: ("Logical-Mathematical", "هوش منطقی-ریاضی"),
        shadow: ("Perfectionism", "کمال‌گرایی"),
        key_traits: (
            ["Order", "Perfection", "Hidden Flaws"],
            ["نظم", "کمال", "نقص پنهان"],
        ),
        description: (
            "System builders who strive for perfection and excel at creating order from chaos.",
            "سازندگان سیستم که برای کمال تلاش می‌کنند و در ایجاد نظم از هرج و مرج مهارت دارند.",
        ),
        color: "#0891B2",
    },
    Archetype {
        id: ArchetypeId::Arash,
        name: ("Arash", "آرش"),
        title: ("Idealist Archer", "کمان‌گیر آرمان‌گرا"),
        intelligence: ("Spatial-Visual", "هوش فضایی-دیداری"),
        shadow: ("Dogmatism", "جزم‌اندیشی"),
        key_traits: (
            ["Direction", "Intense Focus", "Single Goal"],
            ["جهت", "تمرکز شدید", "هدف واحد"],
        ),
        description: (
            "Goal-oriented individuals who sacrifice everything for their singular vision.",
            "افراد هدف‌محوری که همه چیز را برای دیدگاه واحدشان قربانی می‌کنند.",
        ),
        color: "#065F46",
    },
    Archetype {
        id: ArchetypeId::Zahhak,
        name: ("Zahhak", "ضحاک"),
        title: ("Charismatic Manipulator", "فرمانروای اغواگر"),
        intelligence: ("Interpersonal (Dark)", "هوش میان‌فردی (سیاه)"),
        shadow: ("Manipulation", "دستکاری‌گری"),
        key_traits: (
            ["Charisma", "Deception", "Hidden Danger"],
            ["کاریزما", "فریب", "خطر پنهان"],
        ),
        description: (
            "Master manipulators who use charm and charisma to achieve their goals.",
            "دستکاری‌گران ماهری که از جذابیت و کاریزما برای رسیدن به اهدافشان استفاده می‌کنند.",
        ),
        color: "#581C87",
    },
    Archetype {
        id: ArchetypeId::Fereydun,
        name: ("Fereydun", "فریدون"),
        title: ("Just Mediator", "دادگرِ میانجی"),
        intelligence: ("Existential", "هوش وجودی"),
        shadow: ("Indecision", "دودلی"),
        key_traits: (
            ["Balance", "Justice", "Harmony"],
            ["تعادل", "عدالت", "هارمونی"],
        ),
        description: (
            "Natural mediators who seek balance and avoid conflict while pondering life's meaning.",
            "میانجی‌گران طبیعی که به دنبال تعادل هستند و از درگیری پرهیز می‌کنند در حالی که به معنای زندگی می‌اندیشند.",
        ),
        color: "#1E40AF",
    },
    Archetype {
        id: ArchetypeId::Manizheh,
        name: ("Manizheh", "منیژه"),
        title: ("Passionate Loyal", "وفادار پرشور"),
        intelligence: ("Emotional", "هوش عاطفی"),
        shadow: ("Dependency", "وابستگی"),
        key_traits: (
            ["Loyalty", "Intense Connection", "Passion"],
            ["وفاداری", "ارتباط شدید", "شور"],
        ),
        description: (
            "Intensely loyal individuals who make decisions based on emotions and deep connections.",
            "افراد شدیداً وفاداری که تصمیمات را بر اساس احساسات و ارتباطات عمیق می‌گیرند.",
        ),
        color: "#BE185D",
    },
];
