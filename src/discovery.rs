//! Catalog provider: parses node-kind type declarations into a
//! [`Discovery`] catalog.
//!
//! Declarations come in two forms:
//!
//! ```text
//! node FunctionDeclaration {
//!     modifiers: ModifiersArray,
//!     name: Identifier,
//!     parameters: [ParameterDeclaration],
//!     body: Block,
//!     factory locals: SymbolTable,
//! }
//!
//! type Declaration = FunctionDeclaration | ClassDeclaration;
//! ```
//!
//! A `node` declares a createable/testable syntax construct; it is also
//! updateable if at least one field is not `factory`-synthesized. A
//! `type` declares a union over previously or later declared nodes.
//!
//! Field shapes: `prop: [T]` is an ordered child list (emitted type
//! `NodeArray<T>`), `prop: ModifiersArray` routes through the modifier
//! primitive, lowercase-initial types (`string`, `boolean`, ...) are
//! scalars, and everything else is a single child node.

use heck::{AsLowerCamelCase, AsPascalCase};
use rustc_hash::FxHashSet;

use crate::{
    catalog::{Discovery, Param, SyntaxNode, SyntaxType},
    error::{Result, error_span},
    span::Span,
    token::{TokenKind, Tokens, tokenize},
};

pub fn discover(src: &str) -> Result<Discovery> {
    let tokens = tokenize(src);
    let mut p = State::new(&tokens);

    let mut nodes = Vec::new();
    let mut types = Vec::new();

    while !p.end() {
        match p.kind() {
            TokenKind::Node => nodes.push(parse_node(&mut p)?),
            TokenKind::Type => types.push(parse_type(&mut p)?),
            _ => {
                return Err(error_span(
                    format!("expected 'node' or 'type', found '{}'", p.lexeme()),
                    p.span(),
                ));
            }
        }
    }

    lower(nodes, types)
}

struct State<'t, 'src> {
    tokens: &'t Tokens<'src>,
    index: usize,
}

impl<'t, 'src> State<'t, 'src> {
    fn new(tokens: &'t Tokens<'src>) -> Self {
        Self { tokens, index: 0 }
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.tokens.kind(self.index)
    }

    #[inline]
    fn lexeme(&self) -> &'src str {
        self.tokens.lexeme(self.index)
    }

    #[inline]
    fn span(&self) -> Span {
        self.tokens.span(self.index)
    }

    #[inline]
    fn advance(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn end(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Iff current token is `kind`, returns `true`. Does not advance.
    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Iff current token is `kind` advances and returns `true`,
    /// otherwise returns `false` without advancing.
    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Iff current token is `kind`, returns its index and advances,
    /// otherwise returns `Err` without advancing.
    fn must(&mut self, kind: TokenKind) -> Result<usize> {
        let index = self.index;
        if self.eat(kind) {
            Ok(index)
        } else {
            let found = match self.lexeme() {
                "" => self.kind().bare_lexeme(),
                lexeme => lexeme,
            };
            Err(error_span(
                format!("expected '{}', found '{}'", kind.bare_lexeme(), found),
                self.span(),
            ))
        }
    }
}

struct RawNode<'src> {
    name: &'src str,
    name_span: Span,
    fields: Vec<RawField<'src>>,
}

struct RawField<'src> {
    name: &'src str,
    ty: &'src str,
    is_list: bool,
    is_factory: bool,
}

struct RawType<'src> {
    name: &'src str,
    members: Vec<(&'src str, Span)>,
}

fn parse_node<'t, 'src>(p: &mut State<'t, 'src>) -> Result<RawNode<'src>> {
    p.must(TokenKind::Node)?;
    let name = p.must(TokenKind::Ident)?;
    let name_span = p.tokens.span(name);
    let name = p.tokens.lexeme(name);
    p.must(TokenKind::BraceL)?;

    let mut fields = Vec::new();
    loop {
        if p.eat(TokenKind::BraceR) {
            break;
        }
        fields.push(parse_field(p)?);
        if !p.eat(TokenKind::Comma) {
            p.must(TokenKind::BraceR)?;
            break;
        }
    }

    Ok(RawNode {
        name,
        name_span,
        fields,
    })
}

fn parse_field<'t, 'src>(p: &mut State<'t, 'src>) -> Result<RawField<'src>> {
    let is_factory = p.eat(TokenKind::Factory);
    let name = p.must(TokenKind::Ident)?;
    let name = p.tokens.lexeme(name);
    p.must(TokenKind::Colon)?;

    let (ty, is_list) = if p.eat(TokenKind::BracketL) {
        let ty = p.must(TokenKind::Ident)?;
        p.must(TokenKind::BracketR)?;
        (ty, true)
    } else {
        (p.must(TokenKind::Ident)?, false)
    };

    Ok(RawField {
        name,
        ty: p.tokens.lexeme(ty),
        is_list,
        is_factory,
    })
}

fn parse_type<'t, 'src>(p: &mut State<'t, 'src>) -> Result<RawType<'src>> {
    p.must(TokenKind::Type)?;
    let name = p.must(TokenKind::Ident)?;
    let name = p.tokens.lexeme(name);
    p.must(TokenKind::Eq)?;

    let mut members = Vec::new();
    loop {
        let member = p.must(TokenKind::Ident)?;
        members.push((p.tokens.lexeme(member), p.tokens.span(member)));
        if !p.eat(TokenKind::Pipe) {
            break;
        }
    }
    p.must(TokenKind::Semi)?;

    Ok(RawType { name, members })
}

fn lower(nodes: Vec<RawNode<'_>>, types: Vec<RawType<'_>>) -> Result<Discovery> {
    // collected up front so field types may reference forward declarations
    let node_names: FxHashSet<String> = nodes
        .iter()
        .map(|node| AsPascalCase(node.name).to_string())
        .collect();
    let type_names: FxHashSet<String> = types
        .iter()
        .map(|ty| AsPascalCase(ty.name).to_string())
        .collect();

    let mut discovery = Discovery::default();

    for node in &nodes {
        let type_name = AsPascalCase(node.name).to_string();
        let create_params = node
            .fields
            .iter()
            .map(|field| lower_field(field, &node_names, &type_names))
            .collect();

        let descriptor = SyntaxNode {
            create_fn: format!("create{type_name}"),
            update_fn: format!("update{type_name}"),
            test_fn: format!("is{type_name}"),
            kind_name: type_name.clone(),
            type_name,
            create_params,
        };
        if discovery.add(descriptor).is_none() {
            return Err(error_span(
                format!("duplicate node declaration '{}'", AsPascalCase(node.name)),
                node.name_span,
            ));
        }
    }

    for ty in &types {
        let type_name = AsPascalCase(ty.name).to_string();
        let mut members = Vec::new();
        for (member, span) in &ty.members {
            let member_name = AsPascalCase(member).to_string();
            let Some(node) = discovery.get(&member_name) else {
                return Err(error_span(
                    format!("unknown syntax node '{member_name}' in type '{type_name}'"),
                    *span,
                ));
            };
            members.push(node.kind_name.clone());
        }
        discovery.add_type(SyntaxType {
            test_fn: format!("is{type_name}"),
            type_name,
            members,
        });
    }

    Ok(discovery)
}

fn lower_field(
    field: &RawField<'_>,
    node_names: &FxHashSet<String>,
    type_names: &FxHashSet<String>,
) -> Param {
    let scalar = is_scalar_ty(field.ty);
    let ty_name = if scalar {
        field.ty.to_string()
    } else {
        AsPascalCase(field.ty).to_string()
    };

    let is_modifiers_array = ty_name == "ModifiersArray";
    let test_for = |ty: &str| {
        (node_names.contains(ty) || type_names.contains(ty)).then(|| format!("is{ty}"))
    };
    let (visitor_fn, visitor_test) = if is_modifiers_array {
        (Some("visitNodes".to_string()), None)
    } else if field.is_list {
        (Some("visitNodes".to_string()), test_for(&ty_name))
    } else if !scalar {
        (Some("visitNode".to_string()), test_for(&ty_name))
    } else {
        (None, None)
    };

    Param {
        name: AsLowerCamelCase(field.name).to_string(),
        ty: if field.is_list {
            format!("NodeArray<{ty_name}>")
        } else {
            ty_name
        },
        property: field.name.to_string(),
        is_modifiers_array,
        is_node_array: field.is_list,
        is_factory: field.is_factory,
        visitor_fn,
        visitor_test,
    }
}

fn is_scalar_ty(ty: &str) -> bool {
    ty.starts_with(|c: char| c.is_ascii_lowercase())
}
