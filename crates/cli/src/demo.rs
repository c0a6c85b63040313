//! Built-in sample messages for the `demo` and `benchmark` commands.

/// A message with a short subject line
pub struct SampleMessage {
    pub subject: &'static str,
    pub body: &'static str,
}

/// Sample inbox: Arabic e-mails about taxes, databases, HR, cloud storage
/// and presentations.
pub const SAMPLE_INBOX: &[SampleMessage] = &[
    SampleMessage {
        subject: "تأخير في تسليم الحسابات الضريبية",
        body: "السلام عليكم ، أثناء إعداد التقارير المالية للشهر الماضي، لاحظت وجود تناقضات في الأرقام المتعلقة بالضرائب. أحتاج إلى مراجعة العمليات الحسابية والتاكد من اللوائح و شكرا",
    },
    SampleMessage {
        subject: "مشاكل في قواعد البيانات",
        body: "والتنواجه مشاكل متكررة مع تنظيم البيانات داخل نظام قواعد البيانات الحالي. البيانات تتكرر وهناك صعوبة في الوصول إلى المعلومات الدقيقة بسرعة. نحتاج إلى حلول فعالة لإدارة البيانات.",
    },
    SampleMessage {
        subject: "الموارد البشرية وتوزيع المهام",
        body: "لاحظت وجود بعض التحديات في توزيع المهام بين الموظفين وعدم وضوح الأدوار في الفريق. نحتاج إلى تطوير المهارات القيادية لتحسين الأداء.",
    },
    SampleMessage {
        subject: "التخزين السحابي وعروض تقديمية",
        body: "أواجه صعوبة في إدارة الملفات على التخزين السحابي وإنشاء عروض تقديمية فعالة للاجتماعات القادمة.",
    },
];

/// User chat messages from the sample conversation
pub const SAMPLE_CHAT: &[SampleMessage] = &[
    SampleMessage {
        subject: "chat: financial reports",
        body: "مرحبًا، أثناء إعداد التقارير المالية للشهر الماضي، لاحظت وجود تناقضات في الأرقام المتعلقة بالضرائب. أحتاج إلى بعض المساعدة في مراجعة العمليات الحسابية والتأكد من الامتثال للوائح. شكرًا.",
    },
    SampleMessage {
        subject: "chat: data organization",
        body: "السلام عليكم، نواجه مشاكل متكررة مع تنظيم البيانات داخل نظام قواعد البيانات الحالي. البيانات تتكرر وهناك صعوبة في الوصول إلى المعلومات الدقيقة بسرعة. نحتاج إلى حلول فعالة لإدارة البيانات.",
    },
];

/// Every sample message, inbox first
pub fn all_samples() -> impl Iterator<Item = &'static SampleMessage> {
    SAMPLE_INBOX.iter().chain(SAMPLE_CHAT.iter())
}
