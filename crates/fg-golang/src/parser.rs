//! Go declaration parser built on top of `tree-sitter-go`.
//!
//! Only the top level of a file matters here: the package clause, imports and
//! `type` declarations. Function bodies, constants and variables are walked
//! past without being modelled.

use eyre::{Result, eyre};
use fg_core::ast::{ImportDecl, RecordField, SourceFile, TypeDecl, TypeDeclKind, TypeExpr};
use tracing::{debug, warn};
use tree_sitter::{Node as TsNode, Parser as TsParser};

/// High-level parser that owns a tree-sitter instance for Go.
pub struct GoParser {
    parser: TsParser,
}

impl GoParser {
    /// Create a new parser instance with the Go grammar loaded.
    pub fn new() -> Result<Self> {
        let mut parser = TsParser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|err| eyre!("Failed to load tree-sitter Go grammar: {err}"))?;
        Ok(Self { parser })
    }

    /// Parse one Go source file. Any syntax error rejects the whole file.
    pub fn parse_str(&mut self, source: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| eyre!("failed to parse Go source"))?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error(root)
                .map(|node| node.start_position())
                .unwrap_or_else(|| root.start_position());
            return Err(eyre!(
                "syntax error at {}:{}",
                position.row + 1,
                position.column + 1
            ));
        }
        parse_file(root, source)
    }
}

fn parse_file(root: TsNode, source: &str) -> Result<SourceFile> {
    let mut cursor = root.walk();
    let mut file = SourceFile::default();

    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => {
                file.package = parse_package_clause(child, source);
            }
            "import_declaration" => {
                file.imports.extend(parse_import_declaration(child, source)?);
            }
            "type_declaration" => {
                file.types.extend(parse_type_declaration(child, source)?);
            }
            "function_declaration" | "method_declaration" | "const_declaration"
            | "var_declaration" | "comment" => {}
            kind => {
                debug!("ignoring go top-level node: {kind:?}");
            }
        }
    }

    Ok(file)
}

fn parse_package_clause(node: TsNode, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "package_identifier" || child.kind() == "identifier" {
            if let Ok(name) = child.utf8_text(source.as_bytes()) {
                return Some(name.to_string());
            }
        }
    }
    warn!("package clause missing name");
    None
}

fn parse_import_declaration(node: TsNode, source: &str) -> Result<Vec<ImportDecl>> {
    let mut imports = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => imports.push(parse_import_spec(child, source)?),
            "import_spec_list" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    if spec.kind() == "import_spec" {
                        imports.push(parse_import_spec(spec, source)?);
                    }
                }
            }
            _ => {}
        }
    }
    Ok(imports)
}

fn parse_import_spec(node: TsNode, source: &str) -> Result<ImportDecl> {
    let path_node = node
        .child_by_field_name("path")
        .ok_or_else(|| eyre!("import spec missing path"))?;
    let alias = node
        .child_by_field_name("name")
        .and_then(|node| node.utf8_text(source.as_bytes()).ok())
        .map(|text| text.to_string());

    Ok(ImportDecl::new(alias, parse_string_literal(path_node, source)?))
}

fn parse_type_declaration(node: TsNode, source: &str) -> Result<Vec<TypeDecl>> {
    let mut decls = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_spec" => decls.push(parse_type_spec(child, source, false)?),
            "type_alias" => decls.push(parse_type_spec(child, source, true)?),
            _ => {}
        }
    }
    Ok(decls)
}

fn parse_type_spec(node: TsNode, source: &str, alias: bool) -> Result<TypeDecl> {
    let name_node = node
        .child_by_field_name("name")
        .ok_or_else(|| eyre!("type spec missing name"))?;
    let name = name_node.utf8_text(source.as_bytes())?.to_string();
    let generic = node.child_by_field_name("type_parameters").is_some();

    let ty_node = node
        .child_by_field_name("type")
        .ok_or_else(|| eyre!("type spec {name} missing type"))?;

    let kind = match ty_node.kind() {
        "struct_type" if !alias => TypeDeclKind::Record(parse_struct_fields(ty_node, source)?),
        _ if alias => TypeDeclKind::Alias(parse_type_node(ty_node, source)?),
        _ => TypeDeclKind::Defined(parse_type_node(ty_node, source)?),
    };

    Ok(TypeDecl {
        name,
        generic,
        kind,
    })
}

fn parse_struct_fields(node: TsNode, source: &str) -> Result<Vec<RecordField>> {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "field_declaration_list" {
            continue;
        }
        fields.extend(parse_field_declaration_list(child, source)?);
    }
    Ok(fields)
}

fn parse_field_declaration_list(node: TsNode, source: &str) -> Result<Vec<RecordField>> {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "field_declaration" {
            continue;
        }
        fields.extend(parse_field_declaration(child, source)?);
    }
    Ok(fields)
}

fn parse_field_declaration(node: TsNode, source: &str) -> Result<Vec<RecordField>> {
    let ty_node = node
        .child_by_field_name("type")
        .ok_or_else(|| eyre!("field declaration missing type"))?;
    let ty = parse_type_node(ty_node, source)?;

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        names.push(child.utf8_text(source.as_bytes())?.to_string());
    }

    if names.is_empty() {
        return Ok(vec![parse_embedded_field(node, ty)]);
    }

    Ok(names
        .into_iter()
        .map(|name| RecordField::new(name, ty.clone()))
        .collect())
}

/// An embedded field is addressed in composite literals by its type's
/// identifier, without package qualifier or pointer star.
fn parse_embedded_field(node: TsNode, ty: TypeExpr) -> RecordField {
    let mut cursor = node.walk();
    let starred = node.children(&mut cursor).any(|child| child.kind() == "*");
    let name = match &ty {
        TypeExpr::Named(name) | TypeExpr::Qualified { name, .. } => name.clone(),
        TypeExpr::Unsupported(kind) => kind.clone(),
        other => {
            warn!("unexpected embedded field type: {other:?}");
            String::from("_")
        }
    };
    let ty = if starred { TypeExpr::pointer(ty) } else { ty };
    RecordField::new(name, ty)
}

fn parse_type_node(node: TsNode, source: &str) -> Result<TypeExpr> {
    match node.kind() {
        "type_identifier" | "identifier" => {
            let text = node.utf8_text(source.as_bytes())?;
            Ok(TypeExpr::named(text))
        }
        "qualified_type" => {
            let package = node
                .child_by_field_name("package")
                .ok_or_else(|| eyre!("qualified type missing package"))?;
            let name = node
                .child_by_field_name("name")
                .ok_or_else(|| eyre!("qualified type missing name"))?;
            Ok(TypeExpr::qualified(
                package.utf8_text(source.as_bytes())?,
                name.utf8_text(source.as_bytes())?,
            ))
        }
        "pointer_type" => {
            let inner = last_named_child(node).ok_or_else(|| eyre!("pointer type missing inner"))?;
            Ok(TypeExpr::pointer(parse_type_node(inner, source)?))
        }
        "slice_type" => {
            let inner = node
                .child_by_field_name("element")
                .or_else(|| last_named_child(node))
                .ok_or_else(|| eyre!("slice type missing element"))?;
            Ok(TypeExpr::slice(parse_type_node(inner, source)?))
        }
        "array_type" => {
            let elem = node
                .child_by_field_name("element")
                .or_else(|| last_named_child(node))
                .ok_or_else(|| eyre!("array type missing element"))?;
            let len = node
                .child_by_field_name("length")
                .ok_or_else(|| eyre!("array type missing length"))?;
            Ok(TypeExpr::array(
                parse_type_node(elem, source)?,
                len.utf8_text(source.as_bytes())?.trim(),
            ))
        }
        "map_type" => {
            let key = node
                .child_by_field_name("key")
                .ok_or_else(|| eyre!("map type missing key"))?;
            let value = node
                .child_by_field_name("value")
                .ok_or_else(|| eyre!("map type missing value"))?;
            Ok(TypeExpr::map(
                parse_type_node(key, source)?,
                parse_type_node(value, source)?,
            ))
        }
        "parenthesized_type" => {
            let inner =
                last_named_child(node).ok_or_else(|| eyre!("parenthesized type missing inner"))?;
            parse_type_node(inner, source)
        }
        kind => {
            debug!("unsupported go type node: {kind:?}");
            Ok(TypeExpr::Unsupported(kind.to_string()))
        }
    }
}

fn parse_string_literal(node: TsNode, source: &str) -> Result<String> {
    let raw = node.utf8_text(source.as_bytes())?;
    if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('`') && raw.ends_with('`')))
    {
        return Ok(raw[1..raw.len() - 1].to_string());
    }
    Ok(raw.to_string())
}

fn last_named_child(node: TsNode) -> Option<TsNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .last()
}

fn first_error(node: TsNode) -> Option<TsNode> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}
