//! Appending the pages of one PDF to another with `lopdf`.

use lopdf::{Document, Object, ObjectId};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];
const MAX_TREE_DEPTH: usize = 64;

/// Moves every page of `source` to the end of `target`'s page tree and returns
/// how many pages were appended.
pub(crate) fn append_document(
    target: &mut Document,
    mut source: Document,
) -> Result<usize, lopdf::Error> {
    source.renumber_objects_with(target.max_id + 1);

    // Collected before the move, the appended pages lose their old parents.
    let pages: Vec<(ObjectId, Vec<(Vec<u8>, Object)>)> = source
        .get_pages()
        .into_values()
        .map(|page_id| (page_id, inherited_attributes(&source, page_id)))
        .collect();

    let source_max = source
        .objects
        .keys()
        .map(|(number, _)| *number)
        .max()
        .unwrap_or(target.max_id);
    target.objects.extend(source.objects);
    target.max_id = target.max_id.max(source_max);

    let pages_root = pages_root(target)?;
    for (page_id, attributes) in &pages {
        let page = target.get_object_mut(*page_id)?.as_dict_mut()?;
        for (key, value) in attributes {
            if !page.has(key) {
                page.set(key.clone(), value.clone());
            }
        }
        page.set("Parent", Object::Reference(pages_root));
    }

    let root = target.get_object_mut(pages_root)?.as_dict_mut()?;
    root.get_mut(b"Kids")?
        .as_array_mut()?
        .extend(pages.iter().map(|(page_id, _)| Object::Reference(*page_id)));
    let count = root.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    root.set("Count", count + pages.len() as i64);

    Ok(pages.len())
}

fn pages_root(doc: &Document) -> Result<ObjectId, lopdf::Error> {
    let catalog = doc.trailer.get(b"Root")?.as_reference()?;
    doc.get_dictionary(catalog)?.get(b"Pages")?.as_reference()
}

fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let mut found: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if depth == MAX_TREE_DEPTH {
            break;
        }
        depth += 1;
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        for key in INHERITABLE_KEYS {
            if page.has(key) || found.iter().any(|(existing, _)| existing.as_slice() == key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                found.push((key.to_vec(), value.clone()));
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    found
}
