//! First-match decision list over literal template anchors.

use tracing::debug;

use super::TemplateId;

const HOTLINE_FORWARD: &str = "пересылаем на рассмотрение сообщение Горячей линии";
const HOTLINE_OPERATOR: &str = "Оператор Горячей линии по противодействию мошенничеству, коррупции и другим нарушениям Корпоративного кодекса";

/// One entry of the decision list.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRule {
    pub id: TemplateId,
    /// All of these must be present.
    pub all_of: &'static [&'static str],
    /// If non-empty, at least one of these must also be present.
    pub any_of: &'static [&'static str],
}

impl TemplateRule {
    pub fn matches(&self, msg: &str) -> bool {
        self.all_of.iter().all(|anchor| msg.contains(anchor))
            && (self.any_of.is_empty() || self.any_of.iter().any(|anchor| msg.contains(anchor)))
    }
}

/// Rules in evaluation order. Specific hotline variants precede the general
/// free-text one since their anchors are supersets of it. The last rule
/// matches everything.
pub const RULES: [TemplateRule; 12] = [
    TemplateRule {
        id: TemplateId::NoText,
        all_of: &["no text message => see attachment"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::TicketExport,
        all_of: &["Письмо сгенерировано автоматически", "ДАННЫЕ ДЛЯ OTRS", "СООБЩЕНИЕ"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::AccountRemoval,
        all_of: &["УДАЛИТЬ АККАУНТ"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::StandardForm,
        all_of: &["Контактный телефон", "Номер карты ПЛ", "Объект", "Адрес", "Примечание"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::DeviceComplaint,
        all_of: &[
            "Причина обращения",
            "Номер ОРТ",
            "ТРК",
            "Вид НП",
            "Наличие транзакции",
            "Краткое описание обращения(хронология)",
        ],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::HotlineEmpty,
        all_of: &[HOTLINE_FORWARD, HOTLINE_OPERATOR, ": Hot-line <hot-line@gazprom-neft.ru>"],
        any_of: &[
            "Voice message 800 700 6500",
            "The letter was sent automatically, please do not reply to this message.",
        ],
    },
    TemplateRule {
        id: TemplateId::HotlineForward,
        all_of: &[
            HOTLINE_FORWARD,
            HOTLINE_OPERATOR,
            ": Hot-line <hot-line@gazprom-neft.ru>",
            "Сообщение из формы HOTLINE",
        ],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::HotlineFreeText,
        all_of: &[HOTLINE_FORWARD, HOTLINE_OPERATOR, "Hot-line <hot-line@gazprom-neft.ru>"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::HotlineFeedback,
        all_of: &[
            "Информационное сообщение сайта www.gazprom-neft.ru",
            "Вам было отправлено сообщение через форму обратной связи",
            "Сообщение сгенерировано автоматически.",
        ],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::CorporateResponse,
        all_of: &[
            "Информационная служба",
            "ПАО \"ГАЗПРОМ НЕФТЬ\"",
            "Россия, 190000, Санкт-Петербург, ул. Почтамтская, д.3-5",
            "WWW.GAZPROM-NEFT.RU",
        ],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::ComplaintBook,
        all_of: &["Суть обращения", "Принятые меры", "Ответ клиенту"],
        any_of: &[],
    },
    TemplateRule {
        id: TemplateId::Other,
        all_of: &[],
        any_of: &[],
    },
];

/// Identify the template a raw message follows.
pub fn classify(msg: &str) -> (TemplateId, &'static str) {
    let id = RULES
        .iter()
        .find(|rule| rule.matches(msg))
        .map(|rule| rule.id)
        .unwrap_or(TemplateId::Other);
    debug!("Message matched template {}", id);
    (id, id.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOTLINE_HEADER: &str = "From: Hot-line <hot-line@gazprom-neft.ru>\n\
        Коллеги, пересылаем на рассмотрение сообщение Горячей линии\n\
        Оператор Горячей линии по противодействию мошенничеству, коррупции и другим нарушениям Корпоративного кодекса\n";

    #[test]
    fn test_rules_follow_enum_order() {
        for (i, rule) in RULES.iter().enumerate() {
            assert_eq!(rule.id.index(), i);
        }
    }

    #[test]
    fn test_catch_all() {
        assert_eq!(classify("Добрый день, не работает колонка"), (TemplateId::Other, "Other"));
        assert_eq!(classify("").0, TemplateId::Other);
    }

    #[test]
    fn test_no_text() {
        assert_eq!(classify("no text message => see attachment").0, TemplateId::NoText);
    }

    #[test]
    fn test_hotline_variants() {
        let empty = format!("{HOTLINE_HEADER}Voice message 800 700 6500");
        assert_eq!(classify(&empty).0, TemplateId::HotlineEmpty);

        let forward = format!("{HOTLINE_HEADER}Сообщение из формы HOTLINE\nТекст сообщения: текст");
        assert_eq!(classify(&forward).0, TemplateId::HotlineForward);

        let free = format!("{HOTLINE_HEADER}Тема: жалоба");
        assert_eq!(classify(&free).0, TemplateId::HotlineFreeText);
    }

    #[test]
    fn test_partial_anchor_set_does_not_match() {
        let msg = "Суть обращения: грубость\nПринятые меры: беседа";
        assert_eq!(classify(msg).0, TemplateId::Other);
    }

    #[test]
    fn test_earlier_rule_wins() {
        let msg = "no text message => see attachment\nСуть обращения Принятые меры Ответ клиенту";
        assert_eq!(classify(msg).0, TemplateId::NoText);
    }
}
