#[cfg(test)]
mod ned_export_tests {
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    use nedgen::omnetpp::{convert, load_options, to_omnetpp, LinkQuantity, NedOptions};
    use nedgen::topology::{load_topology, Edge, Topology};
    use nedgen::ExportError;

    fn gml_file(content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(".gml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn connection_lines(script: &str) -> Vec<String> {
        script
            .lines()
            .map(str::trim)
            .filter(|l| l.contains("-->") || l.contains("<--"))
            .map(str::to_string)
            .collect()
    }

    /// Node indices referenced by `node[i]` in a connection line
    fn referenced_indices(line: &str) -> Vec<usize> {
        line.split("node[")
            .skip(1)
            .filter_map(|rest| rest.split(']').next())
            .map(|i| i.parse().unwrap())
            .collect()
    }

    const RING_GML: &str = r#"
        Creator "test"
        graph [
            name "Ring #4 (test)"
            capacity_unit "Gbps"
            delay_unit "us"
            node [ id 10 label "r10" ]
            node [ id 20 label "r20" ]
            node [ id 30 label "r30" ]
            node [ id 40 label "r40" ]
            edge [ source 10 target 20 delay 500 capacity 1 ]
            edge [ source 20 target 30 delay 250 capacity 10 ]
            edge [ source 30 target 40 delay 1000 capacity 0.5 ]
            edge [ source 40 target 10 delay 50 capacity 40 ]
        ]
    "#;

    /// Undirected topologies produce two statements per edge
    #[test]
    fn test_gml_ring_export() {
        let file = gml_file(RING_GML);
        let topology = load_topology(file.path()).unwrap();

        let conversion = convert(&topology, &NedOptions::default()).unwrap();
        let lines = connection_lines(&conversion.script);

        assert!(conversion.advisories.is_empty());
        assert_eq!(lines.len(), 2 * topology.edge_count());
        assert!(conversion.script.contains("network Ring_4_test\n"));
        assert!(conversion.script.contains("node[4]: node;"));
        assert_eq!(
            lines[0],
            "node[0].ppg$o++ --> {delay=0.5ms; datarate=1000Mbps;} --> node[1].ppg$i++;"
        );
        assert_eq!(
            lines[7],
            "node[3].ppg$i++ <-- {delay=0.05ms; datarate=40000Mbps;} <-- node[0].ppg$o++;"
        );
    }

    /// Every index used in a statement comes from the node mapping
    #[test]
    fn test_indices_are_a_bijection() {
        let file = gml_file(RING_GML);
        let topology = load_topology(file.path()).unwrap();
        let conversion = convert(&topology, &NedOptions::default()).unwrap();

        let used: HashSet<usize> = connection_lines(&conversion.script)
            .iter()
            .flat_map(|l| referenced_indices(l))
            .collect();
        let expected: HashSet<usize> = (0..topology.node_count()).collect();

        assert_eq!(used, expected);
    }

    #[test]
    fn test_directed_gml_export() {
        let file = gml_file(
            r#"graph [
                directed 1
                capacity_unit "Mbps"
                delay_unit "ms"
                node [ id 0 ]
                node [ id 1 ]
                edge [ source 0 target 1 delay 10 capacity 100 ]
            ]"#,
        );
        let topology = load_topology(file.path()).unwrap();
        let conversion = convert(&topology, &NedOptions::default()).unwrap();
        let lines = connection_lines(&conversion.script);

        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "node[0].ppg$o++ --> {delay=10ms; datarate=100Mbps;} --> node[1].ppg$i++;"
        );
        assert!(!conversion.script.contains("<--"));
        assert!(conversion.script.contains("network net\n"));
    }

    #[test]
    fn test_mbps_capacity_is_unchanged() {
        let mut topology = Topology::directed("scale");
        topology.set_capacity_unit("Mbps");
        topology.add_edge(Edge::new("a", "b").with_capacity(5.0));

        let conversion = convert(&topology, &NedOptions::default()).unwrap();

        assert!(conversion.script.contains("{datarate=5Mbps;}"));
        assert!(!conversion.script.contains("delay="));
        assert_eq!(conversion.advisories.len(), 1);
        assert_eq!(conversion.advisories[0].quantity, LinkQuantity::Delay);
    }

    #[test]
    fn test_gml_without_units_degrades() {
        let file = gml_file(
            r#"graph [
                node [ id 0 ]
                node [ id 1 ]
                edge [ source 0 target 1 delay 10 capacity 100 ]
            ]"#,
        );
        let topology = load_topology(file.path()).unwrap();
        let conversion = convert(&topology, &NedOptions::default()).unwrap();

        assert!(!conversion.script.contains("delay="));
        assert!(!conversion.script.contains("datarate="));
        assert_eq!(connection_lines(&conversion.script).len(), 2);
        assert_eq!(conversion.advisories.len(), 2);
    }

    #[test]
    fn test_options_file_changes_names() {
        let mut options_file = NamedTempFile::new().unwrap();
        write!(options_file, "node_module: router\ngate: port\nheader: Lab network\n").unwrap();
        let options = load_options(options_file.path()).unwrap();

        let mut topology = Topology::new("lab");
        topology.add_edge(Edge::new("a", "b"));
        let conversion = convert(&topology, &options).unwrap();

        assert!(conversion.script.starts_with("// Lab network\n"));
        assert!(conversion.script.contains("module router"));
        assert!(conversion.script.contains("router[2]: router;"));
        assert!(conversion
            .script
            .contains("router[0].port$o++ --> router[1].port$i++;"));
    }

    #[test]
    fn test_export_to_file_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.ned");
        let file = gml_file(RING_GML);
        let topology = load_topology(file.path()).unwrap();

        to_omnetpp(&topology, Some(&path), &NedOptions::default()).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();

        let mut smaller = Topology::directed("small");
        smaller.add_edge(Edge::new("x", "y"));
        to_omnetpp(&smaller, Some(&path), &NedOptions::default()).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert!(first.contains("network Ring_4_test"));
        assert!(second.contains("network small"));
        assert!(!second.contains("Ring_4_test"));
    }

    #[test]
    fn test_export_to_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.ned");

        let err = to_omnetpp(&Topology::new("x"), Some(&path), &NedOptions::default()).unwrap_err();

        match err {
            ExportError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    /// Repeated node ids and reversed undirected edges in a JSON document
    /// collapse, so the network size matches the distinct nodes
    #[test]
    fn test_json_duplicates_collapse_in_export() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "name": "dup",
                "graph": {{ "capacity_unit": "Mbps", "delay_unit": "ms" }},
                "nodes": ["a", "b", "a"],
                "edges": [
                    {{ "source": "a", "target": "b", "delay": 1, "capacity": 10 }},
                    {{ "source": "b", "target": "a", "delay": 1, "capacity": 10 }}
                ]
            }}"#
        )
        .unwrap();

        let topology = load_topology(file.path()).unwrap();
        let conversion = convert(&topology, &NedOptions::default()).unwrap();
        let lines = connection_lines(&conversion.script);

        assert!(conversion.script.contains("node[2]: node;"));
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "node[0].ppg$o++ --> {delay=1ms; datarate=10Mbps;} --> node[1].ppg$i++;"
        );
    }

    #[test]
    fn test_malformed_gml_is_rejected() {
        let file = gml_file("graph [ node [ id 0 ] edge [ source 0 target 1 ] ]");
        assert!(matches!(
            load_topology(file.path()),
            Err(ExportError::UnknownNode { .. })
        ));

        let file = gml_file("graph [ node [ id 0 ");
        assert!(matches!(load_topology(file.path()), Err(ExportError::Gml(_))));
    }
}
