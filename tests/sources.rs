mod common;

use std::fs;

use classfile_ast::{
    emit_all, translate, ClassDescriptor, ClassPath, DirectorySource, Emitter, MemorySource,
    TranslateAll, TypeRegistry,
};

use common::{default_constructor, ClassBuilder, ACC_PRIVATE};

fn write_class(root: &std::path::Path, class_path: &str, class: &ClassBuilder) {
    let path = root.join(format!("{class_path}.class"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, class.build()).unwrap();
}

// ---- Class sources ----

#[test]
fn test_directory_source() {
    let dir = tempfile::tempdir().unwrap();
    let main = default_constructor(ClassBuilder::new("app/Main"), "app/Main")
        .field(ACC_PRIVATE, "helper", "Lapp/util/Helper;");
    let helper = ClassBuilder::new("app/util/Helper");
    write_class(dir.path(), "app/Main", &main);
    write_class(dir.path(), "app/util/Helper", &helper);

    let registry = translate("app/Main", DirectorySource::new(dir.path()), TranslateAll).unwrap();
    let names: Vec<String> = registry.discovered().map(|(_, c)| c.full_name()).collect();
    assert_eq!(names, vec!["app.Main", "app.util.Helper"]);
}

#[test]
fn test_class_path_chain() {
    let dir = tempfile::tempdir().unwrap();
    let main = ClassBuilder::new("app/Main").field(ACC_PRIVATE, "lib", "Llib/Lib;");
    write_class(dir.path(), "app/Main", &main);
    let lib = MemorySource::new().with("lib/Lib", ClassBuilder::new("lib/Lib").build());

    let class_path = ClassPath::new()
        .with(DirectorySource::new(dir.path()))
        .with(lib);
    let registry = translate("app/Main", class_path, TranslateAll).unwrap();
    assert!(registry.lookup("lib/Lib").is_some());
    assert_eq!(registry.discovered().count(), 2);
}

#[cfg(feature = "jar")]
#[test]
fn test_jar_source() {
    use std::io::Write;

    use classfile_ast::JarSource;
    use zip::write::SimpleFileOptions;

    let dir = tempfile::tempdir().unwrap();
    let jar_path = dir.path().join("app.jar");
    {
        let file = fs::File::create(&jar_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
        writer.write_all(b"Manifest-Version: 1.0\r\n\r\n").unwrap();
        writer.add_directory("app/", options).unwrap();
        writer.start_file("app/Main.class", options).unwrap();
        writer
            .write_all(&default_constructor(ClassBuilder::new("app/Main"), "app/Main").build())
            .unwrap();
        writer.finish().unwrap();
    }

    let jar = JarSource::open(&jar_path).unwrap();
    assert_eq!(jar.class_paths().collect::<Vec<_>>(), vec!["app/Main"]);

    let registry = translate("app/Main", jar, TranslateAll).unwrap();
    let (path, class) = registry.discovered().next().unwrap();
    assert_eq!(path, "app/Main");
    assert_eq!(class.methods[0].name(), "<init>");
}

// ---- Emitters ----

#[derive(Default)]
struct NameCollector {
    names: Vec<String>,
}

impl Emitter for NameCollector {
    type Error = String;

    fn emit(&mut self, registry: &TypeRegistry, class: &ClassDescriptor) -> Result<(), String> {
        let super_name = class
            .super_class
            .map(|id| registry[id].full_name())
            .unwrap_or_default();
        self.names.push(format!("{} : {}", class.full_name(), super_name));
        if class.name == "Poison" {
            return Err(class.full_name());
        }
        Ok(())
    }
}

#[test]
fn test_emit_all_in_discovery_order() {
    let a = ClassBuilder::new("pkg/A").field(ACC_PRIVATE, "b", "Lpkg/B;");
    let b = ClassBuilder::new("pkg/B").extends(Some("pkg/A"));
    let registry = translate(
        "pkg/A",
        common::source(&[("pkg/A", &a), ("pkg/B", &b)]),
        TranslateAll,
    )
    .unwrap();

    let mut collector = NameCollector::default();
    emit_all(&registry, &mut collector).unwrap();
    assert_eq!(
        collector.names,
        vec!["pkg.A : java.lang.Object", "pkg.B : pkg.A"]
    );
}

#[test]
fn test_emit_all_stops_at_first_error() {
    let a = ClassBuilder::new("pkg/Poison").field(ACC_PRIVATE, "b", "Lpkg/B;");
    let b = ClassBuilder::new("pkg/B");
    let registry = translate(
        "pkg/Poison",
        common::source(&[("pkg/Poison", &a), ("pkg/B", &b)]),
        TranslateAll,
    )
    .unwrap();

    let mut collector = NameCollector::default();
    assert_eq!(emit_all(&registry, &mut collector), Err("pkg.Poison".to_string()));
    assert_eq!(collector.names.len(), 1);
}
