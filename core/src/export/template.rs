use super::ChartPoint;
use crate::error::Result;

const GRAPH_DATA_MARKER: &str = "{{graph_data}}";
const GRAPH_TITLE_MARKER: &str = "{{graph_title}}";

/// HTML page with a D3.js script drawing an area chart of the exposure
///
/// X axis: slice location (cm); Y axis: tube current-time product (mAs).
/// The markers are replaced by JSON values in [`html_graph_for`].
const AREA_GRAPH_TEMPLATE: &str = r##"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>rradarr &middot; exposure chart</title>
    <script src="https://cdn.jsdelivr.net/npm/d3@7"></script>
    <style>
      body { font-family: Arial, Helvetica Neue, Helvetica, sans-serif; }
      #chart { width: 960px; height: 480px; border: 1px solid #eee; font-size: 10px; }
      #chart .grid line { stroke: #eee; shape-rendering: crispEdges; }
      #chart .min-max line { stroke: lightsteelblue; stroke-dasharray: 4,4; }
      #chart .min-max text { fill: lightsteelblue; font-weight: bold; }
      #chart .area { fill: lightsteelblue; fill-opacity: .75; }
      #chart .line { fill: none; stroke: steelblue; stroke-width: 1.5px; }
      #chart text.title { fill: lightsteelblue; font-weight: bold; }
    </style>
  </head>
  <body>
    <div id="chart"></div>
    <script>
      const data = {{graph_data}};
      const title = {{graph_title}};

      // Slice location [mm] to [cm]
      const attrLoc = d => d.sl / 10;
      // X-ray tube current * exposure time [mAs]
      const attrExp = d => d.xr * d.et / 1000;

      const m = { top: 25, right: 35, bottom: 40, left: 35 },
            width = 960 - m.left - m.right,
            height = 480 - m.top - m.bottom;

      const x = d3.scaleLinear()
            .domain(d3.extent(data, attrLoc)).nice()
            .range([0, width]),
            y = d3.scaleLinear()
            .domain([0, d3.max(data, attrExp) || 1]).nice()
            .range([height, 0]);

      const svg = d3.select("#chart").append("svg")
            .attr("width", width + m.left + m.right)
            .attr("height", height + m.top + m.bottom);
      const graph = svg.append("g")
            .attr("transform", `translate(${m.left},${m.top})`);

      graph.append("g").attr("class", "grid")
          .attr("transform", `translate(0,${height})`)
          .call(d3.axisBottom(x).ticks(10).tickSize(-height));
      graph.append("g").attr("class", "grid")
          .call(d3.axisLeft(y).ticks(10).tickSize(-width));

      const extent = d3.extent(data, attrExp);
      const minMax = graph.append("g").attr("class", "min-max")
          .selectAll("g").data(extent).join("g")
          .attr("transform", d => `translate(0,${y(d)})`);
      minMax.append("line").attr("x2", width);
      minMax.append("text").attr("x", width + 6).attr("dy", ".35em").text(d => d.toFixed(1));

      graph.append("path").datum(data).attr("class", "area")
          .attr("d", d3.area().x(d => x(attrLoc(d))).y0(height).y1(d => y(attrExp(d))));
      graph.append("path").datum(data).attr("class", "line")
          .attr("d", d3.line().x(d => x(attrLoc(d))).y(d => y(attrExp(d))));

      svg.append("text").attr("class", "title")
          .attr("x", (width + m.left + m.right) / 2)
          .attr("y", height + m.top)
          .attr("dy", "2.84em")
          .attr("text-anchor", "middle")
          .text(title);
      document.title = title + " · exposure chart";
    </script>
  </body>
</html>
"##;

/// Returns the HTML chart document for the given points and title
///
/// Points and title are embedded as JSON, so the title needs no escaping
/// by the caller.
pub fn html_graph_for(points: &[ChartPoint], title: &str) -> Result<String> {
    let data = script_safe(serde_json::to_string(points)?);
    let title = script_safe(serde_json::to_string(title)?);
    Ok(AREA_GRAPH_TEMPLATE
        .replacen(GRAPH_DATA_MARKER, &data, 1)
        .replacen(GRAPH_TITLE_MARKER, &title, 1))
}

/// Keeps a JSON literal from closing the enclosing script element
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}
