//! End-to-end message processing.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use focus_inference::{Classification, EntityTagger, SubtopicClassifier, TaggedSpan, TopicClassifier};

use crate::error::{FocusError, Result};
use crate::fields::{CanonicalFields, FieldCollector};
use crate::models::ExtractionConfig;
use crate::target::{clear_text, extract_target_text};
use crate::template::{classify, clean_field, parse_message, ParsedField, ParsedFields, TemplateId};
use crate::text::{AnnotatedText, Span};

/// Everything extracted from one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Recognized template.
    pub template: TemplateId,

    pub template_name: String,

    /// Body text left by the template parser.
    pub body: String,

    /// Raw field snippets from the template parser.
    pub parsed_fields: BTreeMap<ParsedField, String>,

    /// Spans of the target text.
    pub entities: Vec<Span>,

    /// Body without boilerplate and value-only lines.
    pub target_text: String,

    /// Target text after the clearing pass.
    pub target_text_clean: String,

    /// Canonical field values.
    pub fields: CanonicalFields,

    pub topic: Option<Classification>,

    pub subtopic: Option<Classification>,

    /// Non-fatal problems met while processing.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Builder for MessageHandler.
pub struct MessageHandlerBuilder {
    tagger: Option<Box<dyn EntityTagger>>,
    topic: Option<Box<dyn TopicClassifier>>,
    subtopic: Option<Box<dyn SubtopicClassifier>>,
    config: ExtractionConfig,
}

impl MessageHandlerBuilder {
    /// Create a new builder with default configuration and no models.
    pub fn new() -> Self {
        Self {
            tagger: None,
            topic: None,
            subtopic: None,
            config: ExtractionConfig::default(),
        }
    }

    /// Set the entity tagger.
    pub fn with_tagger(mut self, tagger: impl EntityTagger + 'static) -> Self {
        self.tagger = Some(Box::new(tagger));
        self
    }

    /// Set the topic classifier.
    pub fn with_topic_classifier(mut self, classifier: impl TopicClassifier + 'static) -> Self {
        self.topic = Some(Box::new(classifier));
        self
    }

    /// Set the subtopic classifier.
    pub fn with_subtopic_classifier(mut self, classifier: impl SubtopicClassifier + 'static) -> Self {
        self.subtopic = Some(Box::new(classifier));
        self
    }

    /// Set the extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the handler.
    pub fn build(self) -> MessageHandler {
        MessageHandler {
            tagger: self.tagger,
            topic: self.topic,
            subtopic: self.subtopic,
            config: self.config,
        }
    }
}

impl Default for MessageHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs classification, parsing, tagging, target text and field extraction.
///
/// Models are optional; without them the corresponding outputs stay empty
/// and a warning is recorded.
pub struct MessageHandler {
    tagger: Option<Box<dyn EntityTagger>>,
    topic: Option<Box<dyn TopicClassifier>>,
    subtopic: Option<Box<dyn SubtopicClassifier>>,
    config: ExtractionConfig,
}

impl MessageHandler {
    /// Create a new builder.
    pub fn builder() -> MessageHandlerBuilder {
        MessageHandlerBuilder::new()
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Process one raw message.
    pub fn process(&self, msg: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Processing message of {} characters", msg.chars().count());

        // Step 1: Recognize the template
        let (template, template_name) = classify(msg);
        info!("Template: {} ({})", template_name, template.index());

        // Step 2: Parse template fields
        let parsed = match parse_message(template, msg) {
            Ok(parsed) => parsed,
            Err(e) if self.config.fallback_to_raw => {
                warn!("{}, using the raw message as body", e);
                warnings.push(format!("{e}; raw message used as body"));
                ParsedFields::with_body(clean_field(msg))
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Parsed body: {:?}", parsed.body);
        debug!("Parsed fields: {:?}", parsed.fields);

        // Step 3: Tag entities in the body
        let spans = match &self.tagger {
            Some(tagger) => tagger.tag(&parsed.body)?,
            None => {
                warnings.push("no entity tagger configured".to_string());
                Vec::new()
            }
        };
        debug!("Tagged {} entities", spans.len());
        let body = AnnotatedText::new(parsed.body.as_str(), spans.into_iter().map(to_span).collect())?;

        // Step 4: Canonical fields from parsed snippets and tagged spans
        let mut collector = FieldCollector::new();
        for (field, raw) in &parsed.fields {
            if let Some(category) = field.category() {
                collector.add_snippet(category, raw);
            }
        }
        collector.add_spans(&body);
        let fields = collector.finish();
        debug!("Fields: {:?}", fields);

        // Step 5: Target text
        let target = extract_target_text(&body)?;
        let target_text_clean = if self.config.clear_target_text {
            clear_text(target.text())
        } else {
            target.text().to_string()
        };
        debug!("Target text: {:?}", target_text_clean);

        // Step 6: Topic and subtopic of the raw message
        let (topic, subtopic) = self.classify_topics(msg, &mut warnings)?;

        let (target_text, entities) = target.into_parts();
        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!("Message processed in {}ms", processing_time_ms);

        Ok(ExtractionResult {
            template,
            template_name: template_name.to_string(),
            body: parsed.body,
            parsed_fields: parsed.fields,
            entities,
            target_text,
            target_text_clean,
            fields,
            topic,
            subtopic,
            warnings,
            processing_time_ms,
        })
    }

    fn classify_topics(
        &self,
        msg: &str,
        warnings: &mut Vec<String>,
    ) -> Result<(Option<Classification>, Option<Classification>)> {
        let Some(topic_classifier) = &self.topic else {
            warnings.push("no topic classifier configured".to_string());
            return Ok((None, None));
        };
        let topic = topic_classifier.classify(msg)?;
        debug!("Topic: {} ({:.3})", topic.label, topic.score);

        let subtopic = match &self.subtopic {
            Some(classifier) => {
                let subtopic = classifier.classify(&topic.label, msg)?;
                debug!("Subtopic: {} ({:.3})", subtopic.label, subtopic.score);
                Some(subtopic)
            }
            None => {
                warnings.push("no subtopic classifier configured".to_string());
                None
            }
        };
        Ok((Some(topic), subtopic))
    }
}

fn to_span(tagged: TaggedSpan) -> Span {
    Span::new(tagged.begin, tagged.end, tagged.category)
}

/// Whether an error comes from the message content rather than from the
/// pipeline or its models.
pub fn is_message_error(err: &FocusError) -> bool {
    matches!(err, FocusError::Parse(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::fixtures::ticket;
    use focus_inference::InferenceError;
    use pretty_assertions::assert_eq;

    /// Tags fixed substrings with fixed categories.
    struct LookupTagger(Vec<(&'static str, &'static str)>);

    impl EntityTagger for LookupTagger {
        fn tag(&self, text: &str) -> focus_inference::Result<Vec<TaggedSpan>> {
            let mut spans = Vec::new();
            for (needle, category) in &self.0 {
                if let Some(byte) = text.find(needle) {
                    let begin = text[..byte].chars().count();
                    let end = begin + needle.chars().count();
                    spans.push(TaggedSpan::new(begin, end, *category, 0.9));
                }
            }
            spans.sort_by_key(|s| s.begin);
            Ok(spans)
        }
    }

    struct FixedTopic(&'static str);

    impl TopicClassifier for FixedTopic {
        fn classify(&self, _text: &str) -> focus_inference::Result<Classification> {
            Ok(Classification::new(self.0, 0.9))
        }
    }

    struct EchoSubtopic;

    impl SubtopicClassifier for EchoSubtopic {
        fn classify(&self, topic: &str, _text: &str) -> focus_inference::Result<Classification> {
            Ok(Classification::new(format!("{topic}: детали"), 0.7))
        }
    }

    struct FailingTagger;

    impl EntityTagger for FailingTagger {
        fn tag(&self, _text: &str) -> focus_inference::Result<Vec<TaggedSpan>> {
            Err(InferenceError::Request("connection refused".into()))
        }
    }

    #[test]
    fn test_ticket_end_to_end() {
        let handler = MessageHandler::builder().build();
        let result = handler.process(&ticket(["****1234", "", "5678****"])).unwrap();

        assert_eq!(result.template, TemplateId::TicketExport);
        assert_eq!(result.fields.card, "****1234, 5678****");
        assert_eq!(result.fields.station, "42");
        assert_eq!(result.fields.pump, "3");
        assert_eq!(result.fields.fuel, "95");
        assert_eq!(result.target_text, "Заправился на третьей колонке, машина заглохла");
        assert_eq!(result.topic, None);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_tagged_fields_merge_with_parsed() {
        let handler = MessageHandler::builder()
            .with_tagger(LookupTagger(vec![
                ("Добрый день!", "greetings"),
                ("карта *9119", "card"),
                ("АЗС 17", "azs"),
            ]))
            .with_topic_classifier(FixedTopic("Топливо"))
            .with_subtopic_classifier(EchoSubtopic)
            .build();

        let msg = "Добрый день!\nкарта *9119\nНа АЗС 17 обсчитали на кассе";
        let result = handler.process(msg).unwrap();

        assert_eq!(result.template, TemplateId::Other);
        assert_eq!(result.fields.card, "*9119");
        assert_eq!(result.fields.station, "17");
        assert_eq!(result.target_text, "На АЗС 17 обсчитали на кассе");
        assert_eq!(result.entities, vec![Span::new(3, 9, "azs")]);
        assert_eq!(result.topic.map(|t| t.label).as_deref(), Some("Топливо"));
        assert_eq!(result.subtopic.map(|t| t.label).as_deref(), Some("Топливо: детали"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_anchor_not_found_fails_message() {
        let handler = MessageHandler::builder().build();
        let msg = ticket(["", "", ""]).replace("ФАЙЛ\n*", "");
        let err = handler.process(&msg).unwrap_err();
        assert!(is_message_error(&err));
    }

    #[test]
    fn test_anchor_not_found_fallback() {
        let handler = MessageHandler::builder()
            .with_config(ExtractionConfig {
                fallback_to_raw: true,
                ..ExtractionConfig::default()
            })
            .build();
        let msg = ticket(["****1234", "", ""]).replace("ФАЙЛ\n*", "");
        let result = handler.process(&msg).unwrap();

        assert_eq!(result.template, TemplateId::TicketExport);
        assert!(result.parsed_fields.is_empty());
        assert!(result.body.starts_with("Письмо сгенерировано автоматически"));
        assert!(result.warnings[0].contains("ФАЙЛ"));
    }

    #[test]
    fn test_tagger_failure_propagates() {
        let handler = MessageHandler::builder().with_tagger(FailingTagger).build();
        let err = handler.process("текст").unwrap_err();
        assert!(matches!(err, FocusError::Inference(_)));
        assert!(!is_message_error(&err));
    }

    #[test]
    fn test_overlapping_tagger_spans_rejected() {
        let handler = MessageHandler::builder()
            .with_tagger(LookupTagger(vec![("АЗС 17", "azs"), ("17 колонка", "trk")]))
            .build();
        let err = handler.process("АЗС 17 колонка").unwrap_err();
        assert!(matches!(err, FocusError::Text(_)));
    }
}
