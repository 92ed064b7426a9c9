//! Turtle and N-Triples implementation on top of rio

use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use rio_api::formatter::TriplesFormatter;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesParser, TurtleFormatter, TurtleParser};
use std::io::BufRead;

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle document
    pub fn parse(reader: impl BufRead) -> ParseResult<Vec<Triple>> {
        let mut parser = TurtleParser::new(reader, None);
        collect(&mut parser)
    }

    /// Parse an N-Triples document
    pub fn parse_ntriples(reader: impl BufRead) -> ParseResult<Vec<Triple>> {
        let mut parser = NTriplesParser::new(reader);
        collect(&mut parser)
    }
}

fn collect<P>(parser: &mut P) -> ParseResult<Vec<Triple>>
where
    P: TriplesParser,
    ParseError: From<P::Error>,
{
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        triples.push(Triple::new(
            convert_subject(t.subject)?,
            convert_predicate(t.predicate)?,
            convert_object(t.object)?,
        ));
        Ok(())
    })?;
    Ok(triples)
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize triples to a Turtle string
    pub fn serialize<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);

        for triple in triples {
            let subject = match &triple.subject {
                RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
                RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
            };
            let predicate = model::NamedNode { iri: triple.predicate.as_str() };

            // Owned datatype must outlive the borrowed rio term
            let datatype;
            let object = match &triple.object {
                RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
                RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
                RdfObject::Literal(l) => {
                    let literal = if let Some(language) = l.language() {
                        model::Literal::LanguageTaggedString { value: l.value(), language }
                    } else {
                        datatype = l.datatype();
                        if datatype.as_str() == XSD_STRING {
                            model::Literal::Simple { value: l.value() }
                        } else {
                            model::Literal::Typed {
                                value: l.value(),
                                datatype: model::NamedNode { iri: datatype.as_str() },
                            }
                        }
                    };
                    model::Term::Literal(literal)
                }
            };

            formatter
                .format(&model::Triple { subject, predicate, object })
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

fn convert_subject(s: model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(NamedNode::new(n.iri)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(BlankNode::with_id(b.id)?)),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: model::NamedNode) -> Result<RdfPredicate, ParseError> {
    Ok(RdfPredicate::new(p.iri)?)
}

fn convert_object(o: model::Term) -> Result<RdfObject, ParseError> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(NamedNode::new(n.iri)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(BlankNode::with_id(b.id)?)),
        model::Term::Literal(l) => {
            let literal = match l {
                model::Literal::Simple { value } => Literal::new_simple_literal(value),
                model::Literal::LanguageTaggedString { value, language } => {
                    Literal::new_language_tagged_literal(value, language)?
                }
                model::Literal::Typed { value, datatype } => {
                    Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?)
                }
            };
            Ok(RdfObject::Literal(literal))
        }
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        @prefix ex: <http://example.org/mybase#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

        ex:alice rdfs:label "Alice"@en ;
            ex:age 30 ;
            ex:address [ ex:city "Springfield" ] .
    "#;

    #[test]
    fn test_parse_turtle_keeps_document_order() {
        let triples = TurtleParserWrapper::parse(DOC.as_bytes()).unwrap();
        assert_eq!(triples.len(), 4);
        assert_eq!(triples[0].object.lexical(), "Alice");
        assert_eq!(triples[1].object.lexical(), "30");
        assert!(matches!(triples[2].object, RdfObject::BlankNode(_)));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = TurtleParserWrapper::parse("<http://example.org/a> <http://example.org/b> .".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_ntriples() {
        let input = "<http://example.org/a> <http://example.org/b> \"c\" .\n";
        let triples = TurtleParserWrapper::parse_ntriples(input.as_bytes()).unwrap();
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn test_serialized_turtle_parses_back() {
        let triples = TurtleParserWrapper::parse(DOC.as_bytes()).unwrap();
        let output = TurtleSerializerWrapper::serialize(&triples).unwrap();
        assert!(output.contains("http://example.org/mybase#alice"));
        assert!(output.contains("\"Alice\"@en"));

        let reparsed = TurtleParserWrapper::parse(output.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), triples.len());
    }
}
