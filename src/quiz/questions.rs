use super::archetypes::ArchetypeId;
use super::types::Language;

/// One Likert statement. `text` is English, `localized_text` is Persian.
#[derive(Debug)]
pub struct Question {
    pub id: u32,
    pub text: &'static str,
    pub localized_text: &'static str,
    pub archetype: ArchetypeId,
}

impl Question {
    pub fn text_for(&self, lang: Language) -> &'static str {
        lang.pick(self.text, self.localized_text)
    }
}

/// Number of questions in the quiz
pub const QUESTION_COUNT: usize = 60;

/// Find a question by id. Returns None for ids outside the table.
pub fn find_question(id: u32) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// The full question table in presentation order.
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        text: "In crisis situations, I'm the person who instinctively takes leadership and initiates practical action.",
        localized_text: "در شرایط بحرانی، من فردی هستم که به طور غریزی رهبری را به دست گرفته و برای اقدام عملی پیش‌قدم می‌شوم.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 11,
        text: "When someone challenges my abilities, I feel insulted and need to prove myself.",
        localized_text: "وقتی کسی توانایی‌های مرا به چالش می‌کشد، احساس می‌کنم به من توهین شده و باید خودم را ثابت کنم.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 21,
        text: "Competition motivates me and I enjoy pushing my physical limits.",
        localized_text: "رقابت به من انگیزه می‌دهد و از به چالش کشیدن محدودیت‌های فیزیکی‌ام لذت می‌برم.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 31,
        text: "Sometimes I'm so confident in my abilities that I give less value to others' opinions.",
        localized_text: "گاهی آنقدر به توانایی‌های خودم مطمئن هستم که به نظرات دیگران کمتر بها می‌دهم.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 41,
        text: "Physical activities and sports are an important part of my identity and lifestyle.",
        localized_text: "فعالیت‌های بدنی و ورزش، بخش مهمی از هویت و سبک زندگی من است.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 51,
        text: "Impatience with others' weakness or slowness is one of my challenges.",
        localized_text: "ناشکیبایی در برابر ضعف یا کندی دیگران، یکی از چالش‌های من است.",
        archetype: ArchetypeId::Rostam,
    },
    Question {
        id: 2,
        text: "Before making decisions, I need to spend a lot of time alone thinking and analyzing internally.",
        localized_text: "قبل از تصمیم‌گیری، نیاز دارم زمان زیادی را در تنهایی به فکر کردن و تحلیل درونی بپردازم.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 12,
        text: "I prefer to observe events from afar rather than being directly involved in crowds and social interactions.",
        localized_text: "ترجیح می‌دهم از دور ناظر اتفاقات باشم تا اینکه مستقیماً درگیر شلوغی‌ها و تعاملات اجتماعی شوم.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 22,
        text: "My best ideas come when I'm alone and no one disturbs my thoughts.",
        localized_text: "بهترین ایده‌ها زمانی به ذهنم می‌رسد که تنها هستم و کسی مزاحم افکارم نیست.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 32,
        text: "Sometimes I feel others don't understand my inner complexities, so I prefer to stay silent.",
        localized_text: "گاهی احساس می‌کنم دیگران پیچیدگی‌های درونی مرا درک نمی‌کنند، برای همین ترجیح می‌دهم سکوت کنم.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 42,
        text: "I deeply believe in self-knowledge and personal growth.",
        localized_text: "من عمیقاً به خودشناسی و رشد فردی باور دارم.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 52,
        text: "Sometimes I get so absorbed in my inner world that I distance myself from reality and responsibilities.",
        localized_text: "گاهی آنقدر در دنیای درونم غرق می‌شوم که از دنیای واقعی و مسئولیت‌هایش فاصله می‌گیرم.",
        archetype: ArchetypeId::Simorgh,
    },
    Question {
        id: 3,
        text: "It's very important to me that my work and living environment is completely organized, precise, and optimized.",
        localized_text: "برای من بسیار مهم است که محیط کار و زندگی‌ام کاملاً منظم، دقیق و بهینه باشد.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 13,
        text: "Tolerating disorder and inefficiency is very difficult for me and I quickly act to fix it.",
        localized_text: "تحمل بی‌نظمی و ناکارآمدی برایم بسیار دشوار است و سریعاً برای اصلاح آن اقدام می‌کنم.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 23,
        text: "I enjoy building models, systems, and complex programs with many components.",
        localized_text: "من از ساختن مدل‌ها، سیستم‌ها و برنامه‌های پیچیده که اجزای زیادی دارند، لذت می‌برم.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 33,
        text: "If work isn't done according to my high standards, I become extremely frustrated and disappointed.",
        localized_text: "اگر کاری مطابق با استانداردهای بالای من انجام نشود، به شدت کلافه و ناامید می‌شوم.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 43,
        text: "I have high ability in solving logical problems and finding patterns in complex data.",
        localized_text: "توانایی بالایی در حل مسائل منطقی و پیدا کردن الگوها در داده‌های پیچیده دارم.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 53,
        text: "I believe that 'my way is the best way' and convincing me otherwise is difficult.",
        localized_text: "باور دارم که \"راه من بهترین راه است\" و متقاعد کردن من به روشی دیگر دشوار است.",
        archetype: ArchetypeId::Jamshid,
    },
    Question {
        id: 4,
        text: "I can easily unite others for a common goal with my words and excite them.",
        localized_text: "من به راحتی می‌توانم با کلمات، دیگران را برای یک هدف مشترک تهییج و متحد کنم.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 14,
        text: "I naturally look at individuals or systems with too much power with doubt and suspicion.",
        localized_text: "به طور ذاتی به افراد یا سیستم‌هایی که قدرت زیادی دارند، با دیده شک و تردید نگاه می‌کنم.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 24,
        text: "Public speaking and defending an idea is completely natural and even energizing for me.",
        localized_text: "سخنرانی در جمع و دفاع از یک عقیده، برایم کاملاً طبیعی و حتی انرژی‌بخش است.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 34,
        text: "I tend to have control over situations to ensure everything goes right.",
        localized_text: "تمایل دارم کنترل اوضاع را در دست داشته باشم تا مطمئن شوم همه چیز درست پیش می‌رود.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 44,
        text: "I enjoy debate and discussion and believe truth emerges from conflicting opinions.",
        localized_text: "از بحث و مناظره لذت می‌برم و معتقدم حقیقت از دل تضارب آرا بیرون می‌آید.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 54,
        text: "Sometimes I focus so much on revealing the truth that I'm oblivious to the feelings of those involved.",
        localized_text: "گاهی آنقدر روی افشای حقیقت تمرکز می‌کنم که به احساسات افراد درگیر در ماجرا بی‌توجه می‌شوم.",
        archetype: ArchetypeId::Kaveh,
    },
    Question {
        id: 5,
        text: "I've often made important life decisions based on strong feelings and momentary excitement.",
        localized_text: "اغلب تصمیمات مهم زندگی‌ام را بر اساس یک حس قوی و هیجان آنی گرفته‌ام.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 15,
        text: "I prefer passionate and exciting emotional relationships to calm and predictable ones.",
        localized_text: "روابط عاطفی پرشور و هیجان‌انگیز را به روابط آرام و قابل پیش‌بینی ترجیح می‌دهم.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 25,
        text: "My loyalty to those I love is absolute and I'm willing to do anything for them.",
        localized_text: "وفاداری من به کسانی که دوستشان دارم، مطلق است و حاضرم برایشان دست به هر کاری بزنم.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 35,
        text: "Sometimes I get so caught up in the passion of a relationship or idea that I forget logic.",
        localized_text: "گاهی آنقدر درگیر شور و هیجان یک رابطه یا یک ایده می‌شوم که منطق را فراموش می‌کنم.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 45,
        text: "Physical expression of emotions (like hugging or dancing) is natural and comfortable for me.",
        localized_text: "ابراز فیزیکی احساسات (مانند در آغوش کشیدن یا رقصیدن) برایم طبیعی و راحت است.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 55,
        text: "Fear of rejection or being alone can cause me to make decisions I later regret.",
        localized_text: "ترس از طرد شدن یا تنها ماندن، می‌تواند باعث شود تصمیماتی بگیرم که بعداً از آنها پشیمان شوم.",
        archetype: ArchetypeId::Manizheh,
    },
    Question {
        id: 6,
        text: "My first priority is caring for and protecting those around me, even if it means ignoring my own needs.",
        localized_text: "اولویت اول من، مراقبت و حمایت از اطرافیانم است، حتی اگر به قیمت نادیده گرفتن نیازهای خودم تمام شود.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 16,
        text: "Saying 'no' to others' requests is one of the hardest things in the world for me.",
        localized_text: "گفتن \"نه\" به درخواست‌های دیگران برایم یکی از سخت‌ترین کارهای دنیاست.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 26,
        text: "Understanding others' feelings and needs is easy for me and I often put myself in their shoes.",
        localized_text: "درک احساسات و نیازهای دیگران برایم آسان است و اغلب خودم را جای آنها می‌گذارم.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 36,
        text: "I'm often worried about disappointing others.",
        localized_text: "اغلب نگران این هستم که مبادا دیگران را از خودم ناامید کنم.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 46,
        text: "My ability in negotiation and managing human crises is one of my strengths.",
        localized_text: "توانایی من در مذاکره و مدیریت بحران‌های انسانی، یکی از نقاط قوتم است.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 56,
        text: "I often carry the burden of responsibilities that don't belong to me.",
        localized_text: "اغلب بار مسئولیت‌هایی را به دوش می‌کشم که متعلق به من نیستند.",
        archetype: ArchetypeId::Gordafarid,
    },
    Question {
        id: 7,
        text: "When I set a goal for myself, I'm willing to sacrifice everything else to achieve it.",
        localized_text: "وقتی هدفی را برای خودم تعیین می‌کنم، حاضرم هر چیز دیگری را برای رسیدن به آن قربانی کنم.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 17,
        text: "I often focus so intensely on a single goal that I neglect other aspects of life.",
        localized_text: "من اغلب روی یک هدف واحد آنقدر متمرکز می‌شوم که از جنبه‌های دیگر زندگی غافل می‌مانم.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 27,
        text: "I have good vision for spaces and directions and can easily find my way in nature.",
        localized_text: "من دید خوبی نسبت به فضاها و جهت‌ها دارم و به راحتی می‌توانم مسیرم را در طبیعت پیدا کنم.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 37,
        text: "I believe great sacrifices are necessary to reach a noble goal.",
        localized_text: "معتقدم برای رسیدن به یک هدف والا، فداکاری‌های بزرگ لازم است.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 47,
        text: "I can often predict the long-term consequences of a decision like a chess board.",
        localized_text: "اغلب می‌توانم پیامدهای بلندمدت یک تصمیم را مانند یک صفحه شطرنج پیش‌بینی کنم.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 57,
        text: "Sometimes a goal becomes so sacred to me that I forget its humanity and other aspects.",
        localized_text: "گاهی یک هدف آنقدر برایم مقدس می‌شود که انسانیت و جنبه‌های دیگر آن را فراموش می‌کنم.",
        archetype: ArchetypeId::Arash,
    },
    Question {
        id: 8,
        text: "I can easily take control of a crowd and draw people toward me with my verbal charm.",
        localized_text: "می‌توانم به راحتی نبض یک جمع را در دست بگیرم و با جذابیت کلامم، افراد را به سمت خودم بکشانم.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 18,
        text: "In my interactions, sometimes to reach my goal, I don't tell the whole truth or present situations in my favor.",
        localized_text: "در تعاملاتم، گاهی برای رسیدن به هدفم، تمام حقیقت را نمی‌گویم یا شرایط را به نفع خودم جلوه می‌دهم.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 28,
        text: "Networking and creating extensive connections is one of my main strengths.",
        localized_text: "شبکه‌سازی و ایجاد ارتباطات گسترده، یکی از نقاط قوت اصلی من است.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 38,
        text: "I can easily figure out what each person likes and use it to get their attention.",
        localized_text: "به راحتی می‌توانم بفهمم هر کس از چه چیزی خوشش می‌آید و از آن برای جلب توجهش استفاده کنم.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 48,
        text: "I'm like an actor on stage in social situations and I get energy from others' attention.",
        localized_text: "من در موقعیت‌های اجتماعی مانند یک بازیگر روی صحنه هستم و از توجه دیگران انرژی می‌گیرم.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 58,
        text: "It's important to me to appear successful, attractive, and powerful in others' eyes.",
        localized_text: "برایم مهم است که در چشم دیگران، فردی موفق، جذاب و قدرتمند به نظر برسم.",
        archetype: ArchetypeId::Zahhak,
    },
    Question {
        id: 9,
        text: "I always try to play the mediator role in conflicts to maintain peace and balance.",
        localized_text: "همیشه سعی می‌کنم در اختلافات، نقش میانجی را بازی کنم تا آرامش و تعادل حفظ شود.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 19,
        text: "Making decisive decisions that might upset someone is very stressful for me.",
        localized_text: "گرفتن تصمیمات قاطع که ممکن است کسی را ناراحت کند، برایم بسیار استرس‌زاست.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 29,
        text: "I often think about deep life issues like 'purpose' and 'meaning'.",
        localized_text: "اغلب در مورد مسائل عمیق زندگی مانند \"هدف\" و \"معنا\" فکر می‌کنم.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 39,
        text: "I avoid direct confrontation and prefer issues to be resolved with peace and calm.",
        localized_text: "از رویارویی مستقیم و تقابل پرهیز می‌کنم و ترجیح می‌دهم مسائل با صلح و آرامش حل شوند.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 49,
        text: "I'm looking for a universal principle or law that can bring justice and meaning to everyone.",
        localized_text: "به دنبال یافتن یک اصل یا قانون جهانی هستم که بتواند عدالت و معنا را برای همه به ارمغان بیاورد.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 59,
        text: "I often get indecisive at difficult crossroads and postpone decision-making.",
        localized_text: "اغلب در دوراهی‌های سخت، دچار دودلی می‌شوم و تصمیم‌گیری را به تعویق می‌اندازم.",
        archetype: ArchetypeId::Fereydun,
    },
    Question {
        id: 10,
        text: "Music, art, and visual beauty have a very deep impact on my mood and emotions.",
        localized_text: "موسیقی، هنر و زیبایی‌های بصری تأثیر بسیار عمیقی بر روحیه و احساسات من دارند.",
        archetype: ArchetypeId::Roudabeh,
    },
    Question {
        id: 20,
        text: "My emotions are like the sea, sometimes calm and sometimes stormy and uncontrollable.",
        localized_text: "احساسات من مانند دریا، گاهی آرام و گاهی طوفانی و غیرقابل کنترل است.",
        archetype: ArchetypeId::Roudabeh,
    },
    Question {
        id: 30,
        text: "A melody or song can completely change my mood in a moment.",
        localized_text: "یک ملودی یا آهنگ می‌تواند در یک لحظه حال و هوای مرا به کلی زیر و رو کند.",
        archetype: ArchetypeId::Roudabeh,
    },
    Question {
        id: 40,
        text: "My mood heavily depends on the quality of my emotional relationships.",
        localized_text: "حال روحی من به شدت به کیفیت روابط عاطفی‌ام بستگی دارد.",
        archetype: ArchetypeId::Roudabeh,
    },
    Question {
        id: 50,
        text: "My creativity mostly manifests in artistic forms like music, painting, or poetry.",
        localized_text: "خلاقیت من بیشتر در قالب‌های هنری مانند موسیقی، نقاشی یا شعر نمود پیدا می‌کند.",
        archetype: ArchetypeId::Roudabeh,
    },
    Question {
        id: 60,
        text: "When my emotions are hurt, I might react much more intensely than expected.",
        localized_text: "وقتی احساساتم جریحه‌دار می‌شود، ممکن است واکنشی نشان دهم که بسیار شدیدتر از حد انتظار است.",
        archetype: ArchetypeId::Roudabeh,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_ids_are_unique_and_cover_1_to_60() {
        let ids: HashSet<u32> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTION_COUNT);
        assert!((1..=60).all(|id| ids.contains(&id)));
    }

    #[test]
    fn test_six_questions_per_archetype() {
        let mut counts: HashMap<ArchetypeId, usize> = HashMap::new();
        for q in QUESTIONS.iter() {
            *counts.entry(q.archetype).or_default() += 1;
        }
        assert_eq!(counts.len(), ArchetypeId::ALL.len());
        assert!(counts.values().all(|&n| n == 6));
    }

    #[test]
    fn test_find_question() {
        let q = find_question(21).unwrap();
        assert_eq!(q.archetype, ArchetypeId::Rostam);
        assert!(find_question(0).is_none());
        assert!(find_question(61).is_none());
    }

    #[test]
    fn test_text_for_language() {
        let q = find_question(10).unwrap();
        assert!(q.text_for(Language::En).starts_with("Music, art"));
        assert!(q.text_for(Language::Fa).starts_with("موسیقی"));
    }
}
