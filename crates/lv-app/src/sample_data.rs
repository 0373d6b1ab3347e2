//! Bundled sample datasets for the demo driver

/// Earthquake-style point data: magnitude over depth, dated, weighted
/// by felt reports.
pub const POINTS_CSV: &str = "\
date,x,y,category,weight
2004-12-26,30.0,9.1,megathrust,64000
2005-03-28,30.0,8.6,megathrust,2100
2006-05-26,10.0,6.4,shallow,980
2007-09-12,34.0,8.5,megathrust,1800
2009-09-30,81.0,7.6,intermediate,5400
2010-10-25,20.6,7.8,megathrust,430
2011-03-11,29.0,9.1,megathrust,15894
2012-04-11,20.0,8.6,strike-slip,1200
2013-04-06,66.0,7.0,intermediate,310
2014-04-01,25.0,8.2,megathrust,760
2015-04-25,8.2,7.8,shallow,8900
2016-12-17,94.5,7.9,intermediate,210
";

/// Character co-occurrence graph: node value is scene count, link value
/// is shared-scene count.
pub const GRAPH_JSON: &str = r##"{
  "nodes": [
    {"name": "Amara", "value": 34, "colour": "#6496fa"},
    {"name": "Bertrand", "value": 21, "colour": "#fa9664"},
    {"name": "Celine", "value": 28, "colour": "#96fa64"},
    {"name": "Dmitri", "value": 9, "colour": "#fa6496"},
    {"name": "Esther", "value": 16, "colour": "#9664fa"},
    {"name": "Farid", "value": 4}
  ],
  "links": [
    {"source": 0, "target": 1, "value": 12},
    {"source": 0, "target": 2, "value": 9},
    {"source": 1, "target": 2, "value": 6},
    {"source": 2, "target": 3, "value": 3},
    {"source": 3, "target": 4, "value": 2},
    {"source": 0, "target": 4, "value": 7},
    {"source": 4, "target": 5, "value": 1}
  ]
}"##;
